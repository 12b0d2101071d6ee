use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    BlogCategory, BlogPost, ContentStatus, LocalizedText, NewsArticle, NewsCategory,
};

const EDITORIAL_TEAM: &str = "Bridge Research Team";

fn published(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn text(pair: (&str, &str)) -> LocalizedText {
    LocalizedText::new(pair.0, pair.1)
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

struct PostSeed<'a> {
    id: u32,
    slug: &'a str,
    category: BlogCategory,
    title: (&'a str, &'a str),
    excerpt: (&'a str, &'a str),
    body: (&'a str, &'a str),
    tags: &'a [&'a str],
    date: (i32, u32, u32),
    minutes: u32,
    featured: bool,
    status: ContentStatus,
}

impl PostSeed<'_> {
    fn build(self) -> BlogPost {
        BlogPost {
            id: self.id,
            slug: self.slug.to_string(),
            title: text(self.title),
            excerpt: text(self.excerpt),
            body: text(self.body),
            category: self.category,
            tags: tags(self.tags),
            author: EDITORIAL_TEAM.to_string(),
            published_at: published(self.date.0, self.date.1, self.date.2),
            reading_minutes: self.minutes,
            featured: self.featured,
            status: self.status,
            cover_image: Some(format!("/images/blog/{}.jpg", self.slug)),
        }
    }
}

/// Blog posts shipped with the site, in authoring order.
pub fn blog_posts() -> Vec<BlogPost> {
    vec![
        PostSeed {
            id: 1,
            slug: "korea-web3-market-entry-guide",
            category: BlogCategory::MarketEntry,
            title: (
                "A Practical Guide to Entering the Korean Web3 Market",
                "한국 Web3 시장 진출 실전 가이드",
            ),
            excerpt: (
                "Licensing, local partners and go-to-market timing for foreign projects.",
                "해외 프로젝트를 위한 라이선스, 현지 파트너, 진출 시점 정리.",
            ),
            body: (
                "## Why Korea\n\nKorea has one of the most active retail crypto markets.\n\n- Licensing\n- Partnerships\n- Community\n",
                "## 왜 한국인가\n\n한국은 가장 활발한 리테일 가상자산 시장 중 하나입니다.\n\n- 라이선스\n- 파트너십\n- 커뮤니티\n",
            ),
            tags: &["korea", "go-to-market", "strategy"],
            date: (2024, 1, 15),
            minutes: 8,
            featured: true,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 2,
            slug: "vasp-registration-explained",
            category: BlogCategory::Regulation,
            title: (
                "VASP Registration Explained",
                "가상자산사업자(VASP) 신고 제도 해설",
            ),
            excerpt: (
                "What the Specific Financial Information Act requires from exchanges and custodians.",
                "특정금융정보법이 거래소와 수탁업자에게 요구하는 사항을 정리합니다.",
            ),
            body: (
                "## Requirements\n\n1. ISMS certification\n2. Real-name bank accounts\n3. AML program\n",
                "## 요건\n\n1. ISMS 인증\n2. 실명확인 입출금 계정\n3. 자금세탁방지 체계\n",
            ),
            tags: &["vasp", "compliance", "korea"],
            date: (2024, 2, 3),
            minutes: 12,
            featured: false,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 3,
            slug: "virtual-asset-user-protection-act",
            category: BlogCategory::Regulation,
            title: (
                "The Virtual Asset User Protection Act: What Changes",
                "가상자산 이용자보호법 시행으로 달라지는 것들",
            ),
            excerpt: (
                "Custody segregation, insurance and unfair-trading rules now in force.",
                "예치금 분리 보관, 보험 가입, 불공정거래 규제가 시행되었습니다.",
            ),
            body: (
                "## Key obligations\n\nExchanges must segregate user deposits and hold insurance.\n",
                "## 핵심 의무\n\n거래소는 이용자 예치금을 분리 보관하고 보험에 가입해야 합니다.\n",
            ),
            tags: &["compliance", "regulation", "exchange"],
            date: (2024, 7, 19),
            minutes: 10,
            featured: true,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 4,
            slug: "defi-localization-lessons",
            category: BlogCategory::Insights,
            title: (
                "Localizing a DeFi Protocol: Lessons Learned",
                "DeFi 프로토콜 현지화에서 얻은 교훈",
            ),
            excerpt: (
                "Translation is the easy part. Community and support are where launches win.",
                "번역은 쉬운 부분입니다. 성패는 커뮤니티와 고객 지원에서 갈립니다.",
            ),
            body: (
                "## Beyond translation\n\nLocal moderators and Korean-language support matter most.\n",
                "## 번역 그 이상\n\n현지 모더레이터와 한국어 고객 지원이 가장 중요합니다.\n",
            ),
            tags: &["defi", "localization", "community"],
            date: (2024, 3, 22),
            minutes: 6,
            featured: false,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 5,
            slug: "nft-marketplace-case-study",
            category: BlogCategory::CaseStudy,
            title: (
                "Case Study: Launching an NFT Marketplace in Seoul",
                "사례 연구: 서울에서 NFT 마켓플레이스 런칭하기",
            ),
            excerpt: (
                "From zero to 40k monthly users with local IP partnerships.",
                "현지 IP 파트너십으로 월간 사용자 4만 명을 달성한 과정.",
            ),
            body: (
                "## Outcome\n\n| Metric | Value |\n|---|---|\n| MAU | 40k |\n",
                "## 성과\n\n| 지표 | 값 |\n|---|---|\n| 월간 사용자 | 4만 |\n",
            ),
            tags: &["nft", "partnership", "korea"],
            date: (2024, 5, 8),
            minutes: 9,
            featured: true,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 6,
            slug: "token-listing-checklist",
            category: BlogCategory::MarketEntry,
            title: (
                "Token Listing Checklist for Korean Exchanges",
                "국내 거래소 상장 체크리스트",
            ),
            excerpt: (
                "Disclosure, liquidity and governance items DAXA members review.",
                "DAXA 회원사가 검토하는 공시, 유동성, 거버넌스 항목.",
            ),
            body: (
                "## Checklist\n\n- [x] Whitepaper in Korean\n- [ ] Market maker agreement\n",
                "## 체크리스트\n\n- [x] 한국어 백서\n- [ ] 마켓 메이커 계약\n",
            ),
            tags: &["listing", "exchange", "go-to-market"],
            date: (2024, 9, 2),
            minutes: 7,
            featured: false,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 7,
            slug: "zk-rollups-for-enterprises",
            category: BlogCategory::Technology,
            title: (
                "ZK Rollups for Enterprise Pilots",
                "기업 PoC를 위한 ZK 롤업",
            ),
            excerpt: (
                "Where zero-knowledge rollups fit in Korean enterprise blockchain pilots.",
                "국내 기업 블록체인 PoC에서 영지식 롤업이 맞는 지점.",
            ),
            body: (
                "## Fit\n\nPrivacy-preserving settlement is the common thread.\n",
                "## 적합성\n\n프라이버시를 보장하는 정산이 공통 주제입니다.\n",
            ),
            tags: &["zk", "enterprise", "layer2"],
            date: (2024, 10, 11),
            minutes: 11,
            featured: false,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 8,
            slug: "community-building-kakao-telegram",
            category: BlogCategory::Insights,
            title: (
                "Community Building on KakaoTalk and Telegram",
                "카카오톡과 텔레그램 커뮤니티 운영 전략",
            ),
            excerpt: (
                "Korean holders live on KakaoTalk open chats; plan moderation accordingly.",
                "국내 홀더는 카카오톡 오픈채팅에 모입니다. 운영 계획도 그에 맞춰야 합니다.",
            ),
            body: (
                "## Channels\n\nOpen chats, Telegram announcements and Naver blogs.\n",
                "## 채널\n\n오픈채팅, 텔레그램 공지, 네이버 블로그.\n",
            ),
            tags: &["community", "marketing"],
            date: (2024, 11, 27),
            minutes: 5,
            featured: false,
            status: ContentStatus::Published,
        }
        .build(),
        PostSeed {
            id: 9,
            slug: "stablecoin-outlook-2025",
            category: BlogCategory::Insights,
            title: ("Stablecoin Outlook for 2025", "2025 스테이블코인 전망"),
            excerpt: (
                "Won-pegged stablecoins and what the second-phase legislation may allow.",
                "원화 스테이블코인과 2단계 입법이 허용할 수 있는 범위.",
            ),
            body: (
                "## Draft\n\nPending legal review.\n",
                "## 초안\n\n법률 검토 대기 중입니다.\n",
            ),
            tags: &["stablecoin", "regulation"],
            date: (2025, 1, 6),
            minutes: 9,
            featured: false,
            status: ContentStatus::Draft,
        }
        .build(),
    ]
}

struct NewsSeed<'a> {
    id: u32,
    slug: &'a str,
    category: NewsCategory,
    title: (&'a str, &'a str),
    excerpt: (&'a str, &'a str),
    body: (&'a str, &'a str),
    tags: &'a [&'a str],
    date: (i32, u32, u32),
    minutes: u32,
    featured: bool,
    urgent: bool,
    status: ContentStatus,
}

impl NewsSeed<'_> {
    fn build(self) -> NewsArticle {
        NewsArticle {
            id: self.id,
            slug: self.slug.to_string(),
            title: text(self.title),
            excerpt: text(self.excerpt),
            body: text(self.body),
            category: self.category,
            tags: tags(self.tags),
            author: EDITORIAL_TEAM.to_string(),
            published_at: published(self.date.0, self.date.1, self.date.2),
            reading_minutes: self.minutes,
            featured: self.featured,
            urgent: self.urgent,
            status: self.status,
            source_url: None,
        }
    }
}

/// News articles shipped with the site, in authoring order.
pub fn news_articles() -> Vec<NewsArticle> {
    vec![
        NewsSeed {
            id: 1,
            slug: "seoul-office-opening",
            category: NewsCategory::Announcement,
            title: ("We Opened Our Seoul Office", "서울 오피스를 개소했습니다"),
            excerpt: (
                "A new base in Gangnam for client workshops.",
                "고객 워크숍을 위한 강남 신규 거점.",
            ),
            body: ("Our Seoul office is now open.", "서울 오피스가 문을 열었습니다."),
            tags: &["company", "korea"],
            date: (2024, 2, 14),
            minutes: 2,
            featured: true,
            urgent: false,
            status: ContentStatus::Published,
        }
        .build(),
        NewsSeed {
            id: 2,
            slug: "partnership-with-local-exchange",
            category: NewsCategory::Partnership,
            title: (
                "Strategic Partnership with a Local Exchange",
                "국내 거래소와 전략적 파트너십 체결",
            ),
            excerpt: (
                "Joint listing-readiness program for foreign projects.",
                "해외 프로젝트 대상 상장 준비 공동 프로그램.",
            ),
            body: (
                "The program starts next quarter.",
                "프로그램은 다음 분기에 시작됩니다.",
            ),
            tags: &["partnership", "exchange"],
            date: (2024, 4, 30),
            minutes: 3,
            featured: false,
            urgent: false,
            status: ContentStatus::Published,
        }
        .build(),
        NewsSeed {
            id: 3,
            slug: "korea-blockchain-week-2024",
            category: NewsCategory::Event,
            title: (
                "Meet Us at Korea Blockchain Week 2024",
                "코리아 블록체인 위크 2024에서 만나요",
            ),
            excerpt: (
                "Booth B12 and a panel on market entry.",
                "B12 부스 및 시장 진출 패널 세션.",
            ),
            body: ("Find us at booth B12.", "B12 부스에서 만나요."),
            tags: &["event", "kbw"],
            date: (2024, 8, 20),
            minutes: 2,
            featured: true,
            urgent: false,
            status: ContentStatus::Published,
        }
        .build(),
        NewsSeed {
            id: 4,
            slug: "user-protection-act-effective",
            category: NewsCategory::Industry,
            title: (
                "User Protection Act Takes Effect Today",
                "가상자산 이용자보호법 오늘부터 시행",
            ),
            excerpt: (
                "Exchanges must comply with new custody rules immediately.",
                "거래소는 즉시 새로운 보관 규정을 준수해야 합니다.",
            ),
            body: (
                "Contact us for a compliance gap review.",
                "컴플라이언스 점검이 필요하면 문의해 주세요.",
            ),
            tags: &["regulation", "compliance"],
            date: (2024, 7, 19),
            minutes: 4,
            featured: false,
            urgent: true,
            status: ContentStatus::Published,
        }
        .build(),
        NewsSeed {
            id: 5,
            slug: "press-feature-market-entry",
            category: NewsCategory::Press,
            title: (
                "Featured in a Leading Business Daily",
                "주요 경제지에 소개되었습니다",
            ),
            excerpt: (
                "An interview on helping global projects localize in Korea.",
                "글로벌 프로젝트의 한국 현지화 지원에 관한 인터뷰.",
            ),
            body: ("Read the full interview.", "인터뷰 전문을 확인하세요."),
            tags: &["press", "company"],
            date: (2024, 10, 3),
            minutes: 3,
            featured: false,
            urgent: false,
            status: ContentStatus::Published,
        }
        .build(),
        NewsSeed {
            id: 6,
            slug: "office-closure-holiday",
            category: NewsCategory::Announcement,
            title: ("Holiday Office Closure", "연휴 기간 휴무 안내"),
            excerpt: (
                "Responses to inquiries resume after the holiday.",
                "문의 답변은 연휴 이후 재개됩니다.",
            ),
            body: (
                "We are closed during the Lunar New Year holiday.",
                "설 연휴 기간 동안 휴무합니다.",
            ),
            tags: &["company"],
            date: (2025, 1, 24),
            minutes: 1,
            featured: false,
            urgent: true,
            status: ContentStatus::Draft,
        }
        .build(),
    ]
}
