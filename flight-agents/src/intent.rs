//! Keyword routing for free-text airline questions.

pub const KNOWN_AIRPORTS: [&str; 8] = ["PEK", "SHA", "PVG", "CAN", "CTU", "KMG", "XIY", "HGH"];

const SEARCH_KEYWORDS: [&str; 8] = [
    "search", "find", "flight", "query", "搜索", "查找", "航班", "查询",
];
const RECOMMEND_KEYWORDS: [&str; 8] = [
    "recommend", "suggest", "cheap", "deal", "推荐", "建议", "便宜", "划算",
];
const STATS_KEYWORDS: [&str; 7] = ["stats", "statistics", "data", "info", "统计", "数据", "信息"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SearchRoute { departure: String, arrival: String },
    SearchWithoutRoute,
    Recommend,
    Stats,
    Unknown,
}

impl Intent {
    /// Search wins over recommendation, which wins over stats.
    pub fn parse(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

        if mentions(&SEARCH_KEYWORDS[..]) {
            let airports = airports_in(text);
            return match (airports.first(), airports.get(1)) {
                (Some(departure), Some(arrival)) => Intent::SearchRoute {
                    departure: departure.clone(),
                    arrival: arrival.clone(),
                },
                _ => Intent::SearchWithoutRoute,
            };
        }
        if mentions(&RECOMMEND_KEYWORDS[..]) {
            return Intent::Recommend;
        }
        if mentions(&STATS_KEYWORDS[..]) {
            return Intent::Stats;
        }
        Intent::Unknown
    }
}

/// Distinct known airport codes in order of first appearance, upper-cased.
pub fn airports_in(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for token in text.split(|c: char| !c.is_ascii_alphanumeric()) {
        let token = token.to_ascii_uppercase();
        if KNOWN_AIRPORTS.contains(&token.as_str()) && !found.contains(&token) {
            found.push(token);
        }
    }
    found
}
