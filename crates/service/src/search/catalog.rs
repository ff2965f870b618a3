//! Built-in result lists. Titles and snippets embed the query.

use super::{ResultDetails, ResultId, ResultKind, SearchResult};

pub const HOT_KEYWORDS: &[&str] = &[
    "JavaScript",
    "Vue",
    "React",
    "Node.js",
    "TypeScript",
    "算法",
    "系统设计",
    "Python",
    "Java",
];

fn entry(
    id: &str,
    kind: ResultKind,
    title: String,
    url: &str,
    source: &str,
    snippet: String,
    details: ResultDetails,
) -> SearchResult {
    SearchResult {
        id: ResultId::Text(id.to_string()),
        title,
        url: url.to_string(),
        source: source.to_string(),
        kind,
        snippet,
        details,
    }
}

fn article(id: &str, title: String, url: &str, source: &str, snippet: String, views: u64, likes: u64) -> SearchResult {
    entry(id, ResultKind::Article, title, url, source, snippet, ResultDetails::Article { views, likes })
}

fn video(id: &str, title: String, url: &str, source: &str, snippet: String, duration: &str, views: &str) -> SearchResult {
    let details = ResultDetails::Video { duration: duration.into(), views: views.into() };
    entry(id, ResultKind::Video, title, url, source, snippet, details)
}

fn product(id: &str, title: String, url: &str, source: &str, snippet: &str, price: &str, sales: &str) -> SearchResult {
    let details = ResultDetails::Product { price: price.into(), sales: sales.into() };
    entry(id, ResultKind::Product, title, url, source, snippet.to_string(), details)
}

pub fn articles(q: &str) -> Vec<SearchResult> {
    vec![
        article(
            "article-1",
            format!("{q}入门教程 - 从零开始学习"),
            "https://example.com/article/1",
            "掘金",
            format!("这是一篇关于{q}的入门教程，适合初学者阅读，内容涵盖基础概念、核心特性和实战应用。"),
            12580,
            856,
        ),
        article(
            "article-2",
            format!("深入理解{q}的原理与实践"),
            "https://example.com/article/2",
            "知乎",
            format!("本文深入探讨{q}的实现原理，从底层机制到上层应用，帮助你全面掌握相关知识。"),
            8920,
            523,
        ),
        article(
            "article-3",
            format!("{q}最佳实践：从开发到部署"),
            "https://example.com/article/3",
            "CSDN",
            format!("总结{q}在实际项目中的最佳实践经验，包括性能优化、安全加固和部署流程。"),
            15670,
            1024,
        ),
    ]
}

pub fn videos(q: &str) -> Vec<SearchResult> {
    vec![
        video(
            "video-1",
            format!("{q}从入门到精通 - 完整教程"),
            "https://example.com/video/1",
            "B站",
            format!("本系列教程带你从零开始学习{q}，包含大量实战案例和项目演示。"),
            "2小时35分钟",
            "52.8万",
        ),
        video(
            "video-2",
            format!("{q}核心概念详解"),
            "https://example.com/video/2",
            "YouTube",
            format!("深入讲解{q}的核心概念和设计思想，帮助你建立完整的知识体系。"),
            "45分钟",
            "18.5万",
        ),
        video(
            "video-3",
            format!("项目实战：用{q}构建一个完整应用"),
            "https://example.com/video/3",
            "慕课网",
            format!("通过实际项目学习{q}，从需求分析到代码实现，全程干货！"),
            "3小时12分钟",
            "36.2万",
        ),
    ]
}

pub fn products(q: &str) -> Vec<SearchResult> {
    vec![
        product(
            "product-1",
            format!("{q}实战开发指南 - 最新版"),
            "https://example.com/product/1",
            "淘宝",
            "图文并茂，深入浅出，适合各个层次的开发者阅读和学习。",
            "¥89.00",
            "1258件",
        ),
        product(
            "product-2",
            format!("{q}在线课程 - 终身学习"),
            "https://example.com/product/2",
            "极客时间",
            "由一线专家授课，包含视频讲解、代码示例和课后答疑。",
            "¥199.00",
            "3256人学习",
        ),
        product(
            "product-3",
            format!("{q}开发工具套装"),
            "https://example.com/product/3",
            "京东",
            "包含正版授权、技术支持和完整文档，提升开发效率。",
            "¥299.00",
            "856套",
        ),
    ]
}
