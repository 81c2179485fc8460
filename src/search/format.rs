// ABOUTME: Renders a Brave search response as numbered plain text for the
// ABOUTME: caller, including up to three news items when present.

use std::fmt::Write;

use super::SearchResponse;

const MAX_NEWS: usize = 3;

/// Format search results as human-readable text.
pub fn format_results(response: &SearchResponse) -> String {
    let results = response.web_results();
    if results.is_empty() {
        return "No search results found.".to_string();
    }

    let mut output = String::new();

    if let Some(query) = &response.query {
        let _ = writeln!(output, "Search query: \"{}\"", query.original);
    }

    output.push_str("\nResults:\n\n");

    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(output, "{}. {}", i + 1, result.title);
        let _ = writeln!(output, "   URL: {}", result.url);
        let _ = writeln!(output, "   {}", result.description);
        if let Some(age) = result.age.as_deref().filter(|a| !a.is_empty()) {
            let _ = writeln!(output, "   Age: {}", age);
        }
        if let Some(language) = result.language.as_deref().filter(|l| !l.is_empty()) {
            let _ = writeln!(output, "   Language: {}", language);
        }
        output.push('\n');
    }

    let news = response.news_results();
    if !news.is_empty() {
        output.push_str("\n--- News ---\n");
        for (i, item) in news.iter().take(MAX_NEWS).enumerate() {
            let _ = writeln!(output, "\n{}. {}", i + 1, item.title);
            let _ = writeln!(output, "   URL: {}", item.url);
            let _ = writeln!(output, "   {}", item.description);
            if let Some(age) = item.age.as_deref().filter(|a| !a.is_empty()) {
                let _ = writeln!(output, "   Published: {}", age);
            }
        }
    }

    output
}
