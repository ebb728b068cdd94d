use crate::models::{MovieRecord, NOT_AVAILABLE};
use crate::stats::{Aggregate, StatsSummary};

pub const RATING_CAPTION: &str = "⭐ Rating Distribution of Movies You've Searched";
pub const GENRE_CAPTION: &str = "🎭 Your Genre Preferences";
pub const YEAR_CAPTION: &str = "📅 Movies by Release Year";

pub const STATS_BUTTON: &str = "📊 View My Stats";
pub const IMDB_BUTTON: &str = "🔗 View on IMDb";

pub const USAGE: &str = "Please provide a movie name. Example: /search Inception";
pub const FETCH_FAILED: &str =
    "⚠️ Couldn't reach the movie database right now. Please try again in a moment.";
pub const NOT_FOUND: &str = "Movie not found.";
pub const SELECTION_EXPIRED: &str =
    "That menu has expired. Search again and pick a movie from the latest results.";
pub const NO_HISTORY: &str = "You haven't searched for any movies yet! 🎬\n\
    Search for some movies first, then use /stats to see cool visualizations.";
pub const GENERATING: &str = "📊 Generating your movie statistics...";
pub const CLEARED: &str = "✅ Your search history has been cleared!";

pub fn welcome() -> String {
    [
        "🎬 *Welcome to Movie Bot!*",
        "",
        "I can help you discover movies and analyze your preferences.",
        "",
        "*Commands:*",
        "/search <movie name> - Search for a movie",
        "/stats - See visualizations of your searches",
        "/clear - Clear your search history",
        "/help - Show this message",
        "",
        "Or just send me a movie name to search!",
    ]
    .join("\n")
}

fn is_markup(c: char) -> bool {
    matches!(c, '_' | '*' | '`' | '[')
}

/// Escape the characters legacy Telegram Markdown treats as markup. Only
/// valid outside an entity.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if is_markup(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Bold `text` for legacy Markdown. Escapes don't work inside an entity, so
/// the bold span is closed around each markup character, which is escaped
/// between spans.
pub fn bold(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut run = String::new();
    for c in text.chars() {
        if is_markup(c) {
            if !run.is_empty() {
                out += &format!("*{}*", run);
                run.clear();
            }
            out.push('\\');
            out.push(c);
        } else {
            run.push(c);
        }
    }
    if !run.is_empty() {
        out += &format!("*{}*", run);
    }
    out
}

pub fn searching(query: &str) -> String {
    format!("🔍 Searching for '{}'...", query)
}

pub fn no_results(query: &str) -> String {
    format!("No movies found for '{}'. Try a different search!", query)
}

pub fn results_header(query: &str) -> String {
    format!(
        "🎬 {}\n\nTap a movie to see details:",
        bold(&format!("Search Results for '{}':", query))
    )
}

pub fn poster_caption(record: &MovieRecord) -> String {
    format!("🎬 {}", bold(&record.title))
}

fn or_na(value: Option<&str>) -> String {
    escape_markdown(value.unwrap_or(NOT_AVAILABLE))
}

pub fn movie_details(record: &MovieRecord) -> String {
    let rating = record
        .rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let critic_score = record
        .critic_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let cast = if record.actors.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        escape_markdown(&record.actors.join(", "))
    };

    let mut info = format!(
        "🎬 {} ({})\n\n",
        bold(&record.title),
        or_na(record.year.as_deref())
    );
    info += &format!("⭐ IMDb: {}/10\n", rating);
    info += &format!("📊 Metascore: {}/100\n", critic_score);
    info += &format!("🎭 Genre: {}\n", or_na(record.genre.as_deref()));
    info += &format!("⏱️ Runtime: {}\n", or_na(record.runtime.as_deref()));
    info += &format!("🎫 Rated: {}\n", or_na(record.rated.as_deref()));
    info += &format!("🎥 Director: {}\n", or_na(record.director.as_deref()));
    info += &format!("👥 Cast: {}\n\n", cast);
    info += &format!("📖 *Plot:*\n{}", or_na(record.plot.as_deref()));
    info
}

pub fn stats_summary(summary: &StatsSummary) -> String {
    let average = match summary.average_rating {
        Aggregate::Ready(avg) => format!("{:.1}/10", avg),
        Aggregate::NoData => NOT_AVAILABLE.to_string(),
    };

    let mut text = format!(
        "📊 *Your Movie Stats:*\n\nTotal movies searched: {}\nAverage IMDb rating: {}",
        summary.total_movies, average
    );
    if summary.rated_movies < summary.total_movies {
        text += &format!(" ({} of {} rated)", summary.rated_movies, summary.total_movies);
    }
    if let Some(first) = summary.first_viewed_at {
        text += &format!("\nTracking since: {}", first.format("%b %d, %Y"));
    }
    text
}
