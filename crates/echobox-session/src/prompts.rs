// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing prompt texts, choice menus, and callback data codes.
//!
//! Everything the bot says lives here, so the flow and dispatch logic
//! stay free of copy and the tests can assert against stable codes
//! instead of display strings.

use echobox_core::{Category, Choice, ChoiceMenu, FeedbackDraft, Prompt, StatisticsSnapshot};

/// Callback data codes carried by inline menu buttons.
pub mod codes {
    use echobox_core::{Category, Rating};

    pub const START_FEEDBACK: &str = "start_feedback";
    pub const SHOW_STATS: &str = "show_stats";
    pub const ABOUT: &str = "about";
    pub const SUBMIT: &str = "submit";
    pub const EDIT: &str = "edit";
    pub const CANCEL: &str = "cancel";
    pub const RATE_PREFIX: &str = "rate_";
    pub const CATEGORY_PREFIX: &str = "type_";

    pub fn rate(value: u8) -> String {
        format!("{RATE_PREFIX}{value}")
    }

    /// Parses `rate_N` callback data into a rating, rejecting anything
    /// outside 1..=5.
    pub fn rating_from_data(data: &str) -> Option<Rating> {
        data.strip_prefix(RATE_PREFIX)?
            .parse::<u8>()
            .ok()
            .and_then(Rating::new)
    }

    pub fn category(category: Category) -> String {
        format!("{CATEGORY_PREFIX}{}", category.to_string().to_lowercase())
    }

    /// Parses `type_x` callback data into a category.
    pub fn category_from_data(data: &str) -> Option<Category> {
        let suffix = data.strip_prefix(CATEGORY_PREFIX)?;
        Category::ALL
            .into_iter()
            .find(|c| c.to_string().to_lowercase() == suffix)
    }
}

/// Command users can send instead of a comment to skip it.
pub const SKIP_COMMAND: &str = "/skip";

fn category_label(category: Category) -> String {
    let emoji = match category {
        Category::Suggestion => "💡",
        Category::Bug => "🐞",
        Category::Idea => "✨",
        Category::Thanks => "🙏",
    };
    format!("{emoji} {category}")
}

fn stars(count: u8) -> String {
    "⭐".repeat(usize::from(count))
}

/// Main menu shown after /start and at the end of every flow.
pub fn main_menu() -> ChoiceMenu {
    ChoiceMenu::default()
        .row(vec![Choice::new("📝 Leave feedback", codes::START_FEEDBACK)])
        .row(vec![Choice::new("📊 Statistics", codes::SHOW_STATS)])
        .row(vec![Choice::new("ℹ️ About", codes::ABOUT)])
}

pub fn welcome() -> Prompt {
    Prompt::with_menu(
        "👋 Hi! I collect feedback about our service.\n\n\
         Share a suggestion, report a bug, or just say thanks — it all \
         lands directly with the team.",
        main_menu(),
    )
}

pub fn about() -> Prompt {
    Prompt::with_menu(
        "ℹ️ Echobox feedback bot.\n\n\
         Your submissions are stored in a shared sheet the team reviews \
         regularly. A submission takes three quick steps: a rating, a \
         category, and an optional comment.",
        main_menu(),
    )
}

pub fn rating_prompt() -> Prompt {
    let menu = ChoiceMenu::default()
        .row((1u8..=3).map(|v| Choice::new(stars(v), codes::rate(v))).collect())
        .row((4u8..=5).map(|v| Choice::new(stars(v), codes::rate(v))).collect())
        .row(vec![Choice::new("❌ Cancel", codes::CANCEL)]);
    Prompt::with_menu("How would you rate our service, from 1 to 5 stars?", menu)
}

pub fn rating_nudge() -> Prompt {
    let mut prompt = rating_prompt();
    prompt.text = format!("Please use the buttons below.\n\n{}", prompt.text);
    prompt
}

pub fn category_prompt() -> Prompt {
    let menu = ChoiceMenu::default()
        .row(
            [Category::Suggestion, Category::Bug]
                .map(|c| Choice::new(category_label(c), codes::category(c)))
                .to_vec(),
        )
        .row(
            [Category::Idea, Category::Thanks]
                .map(|c| Choice::new(category_label(c), codes::category(c)))
                .to_vec(),
        )
        .row(vec![Choice::new("❌ Cancel", codes::CANCEL)]);
    Prompt::with_menu("What kind of feedback is it?", menu)
}

pub fn category_nudge() -> Prompt {
    let mut prompt = category_prompt();
    prompt.text = format!("Please pick a category with the buttons.\n\n{}", prompt.text);
    prompt
}

pub fn comment_prompt() -> Prompt {
    Prompt::text(format!(
        "Add a comment with more detail, or send {SKIP_COMMAND} to leave it out."
    ))
}

/// Confirmation summary for a completed draft.
///
/// Callers guarantee the draft is complete; absent fields render as "—"
/// rather than panicking.
pub fn confirmation_prompt(draft: &FeedbackDraft) -> Prompt {
    let rating = draft
        .rating
        .map(|r| format!("{} ({}/5)", stars(r.value()), r))
        .unwrap_or_else(|| "—".into());
    let category = draft
        .category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "—".into());
    let comment = match draft.comment.as_deref() {
        Some("") | None => "(none)".to_string(),
        Some(text) => text.to_string(),
    };

    let menu = ChoiceMenu::default()
        .row(vec![
            Choice::new("✅ Submit", codes::SUBMIT),
            Choice::new("✏️ Edit", codes::EDIT),
        ])
        .row(vec![Choice::new("❌ Cancel", codes::CANCEL)]);

    Prompt::with_menu(
        format!(
            "Here is your feedback:\n\n\
             Rating: {rating}\n\
             Category: {category}\n\
             Comment: {comment}\n\n\
             Submit it?"
        ),
        menu,
    )
}

pub fn confirmation_nudge(draft: &FeedbackDraft) -> Prompt {
    let mut prompt = confirmation_prompt(draft);
    prompt.text = format!("Please use the buttons below.\n\n{}", prompt.text);
    prompt
}

pub fn submitted(sheet_url: Option<&str>) -> Prompt {
    let mut text = String::from("✅ Thank you! Your feedback has been recorded.");
    if let Some(url) = sheet_url {
        text.push_str(&format!("\n\nSee it with the rest of the feedback: {url}"));
    }
    Prompt::with_menu(text, main_menu())
}

pub fn store_failure() -> Prompt {
    Prompt::with_menu(
        "😔 Something went wrong while saving your feedback. Nothing was \
         recorded — please try again in a few minutes.",
        main_menu(),
    )
}

pub fn cancelled() -> Prompt {
    Prompt::with_menu("Feedback cancelled. Come back any time!", main_menu())
}

pub fn nothing_to_cancel() -> Prompt {
    Prompt::with_menu("Nothing to cancel right now.", main_menu())
}

pub fn unknown_text() -> Prompt {
    Prompt::with_menu("I didn't catch that. Pick an option below:", main_menu())
}

/// Renders the statistics snapshot, optionally linking the backing sheet.
pub fn statistics(snapshot: &StatisticsSnapshot, sheet_url: Option<&str>) -> Prompt {
    if snapshot.total == 0 {
        return Prompt::with_menu(
            "📊 No feedback has been submitted yet. Be the first!",
            main_menu(),
        );
    }

    let mut text = format!(
        "📊 Feedback statistics\n\n\
         Total submissions: {}\n\
         Average rating: {:.2} / 5\n\
         With comments: {}\n\
         Today: {} · Last 7 days: {}\n",
        snapshot.total,
        snapshot.average_rating,
        snapshot.with_comments,
        snapshot.today,
        snapshot.last_week,
    );

    text.push_str("\nRatings:\n");
    for (rating, count) in &snapshot.rating_distribution {
        text.push_str(&format!("{}: {count}\n", stars(*rating)));
    }

    if !snapshot.category_distribution.is_empty() {
        text.push_str("\nCategories:\n");
        for (category, count) in &snapshot.category_distribution {
            text.push_str(&format!("{category}: {count}\n"));
        }
    }

    if let Some(ref last) = snapshot.last_submission {
        text.push_str(&format!("\nLast submission: {last}\n"));
    }

    if let Some(url) = sheet_url {
        text.push_str(&format!("\nFull data: {url}"));
    }

    Prompt::with_menu(text, main_menu())
}

#[cfg(test)]
mod tests {
    use super::*;
    use echobox_core::Rating;

    #[test]
    fn rating_codes_round_trip() {
        for v in 1..=5u8 {
            let data = codes::rate(v);
            assert_eq!(codes::rating_from_data(&data).map(Rating::value), Some(v));
        }
        assert!(codes::rating_from_data("rate_0").is_none());
        assert!(codes::rating_from_data("rate_6").is_none());
        assert!(codes::rating_from_data("rate_x").is_none());
        assert!(codes::rating_from_data("submit").is_none());
    }

    #[test]
    fn category_codes_round_trip() {
        for cat in Category::ALL {
            let data = codes::category(cat);
            assert_eq!(codes::category_from_data(&data), Some(cat));
        }
        assert_eq!(codes::category_from_data("type_bug"), Some(Category::Bug));
        assert!(codes::category_from_data("type_complaint").is_none());
        assert!(codes::category_from_data("bug").is_none());
    }

    #[test]
    fn rating_menu_covers_all_values_plus_cancel() {
        let prompt = rating_prompt();
        let menu = prompt.menu.unwrap();
        let data: Vec<&str> = menu
            .rows
            .iter()
            .flatten()
            .map(|c| c.data.as_str())
            .collect();
        assert_eq!(
            data,
            vec!["rate_1", "rate_2", "rate_3", "rate_4", "rate_5", "cancel"]
        );
    }

    #[test]
    fn category_menu_covers_all_categories() {
        let prompt = category_prompt();
        let menu = prompt.menu.unwrap();
        let data: Vec<String> = menu.rows.iter().flatten().map(|c| c.data.clone()).collect();
        for cat in Category::ALL {
            assert!(data.contains(&codes::category(cat)));
        }
    }

    #[test]
    fn confirmation_shows_draft_values() {
        let draft = FeedbackDraft {
            rating: Rating::new(4),
            category: Some(Category::Bug),
            comment: Some("it crashed".into()),
        };
        let prompt = confirmation_prompt(&draft);
        assert!(prompt.text.contains("4/5"));
        assert!(prompt.text.contains("Bug"));
        assert!(prompt.text.contains("it crashed"));
    }

    #[test]
    fn confirmation_marks_empty_comment() {
        let draft = FeedbackDraft {
            rating: Rating::new(5),
            category: Some(Category::Thanks),
            comment: Some(String::new()),
        };
        assert!(confirmation_prompt(&draft).text.contains("(none)"));
    }

    #[test]
    fn submitted_includes_sheet_link_when_configured() {
        let with_link = submitted(Some("https://example.com/sheet"));
        assert!(with_link.text.contains("https://example.com/sheet"));
        let without = submitted(None);
        assert!(!without.text.contains("http"));
    }

    #[test]
    fn statistics_renders_counts_and_link() {
        let mut snapshot = StatisticsSnapshot::default();
        snapshot.total = 3;
        snapshot.average_rating = 4.33;
        *snapshot.rating_distribution.get_mut(&5).unwrap() = 2;
        snapshot
            .category_distribution
            .insert("Thanks".into(), 2);

        let prompt = statistics(&snapshot, Some("https://example.com/sheet"));
        assert!(prompt.text.contains("Total submissions: 3"));
        assert!(prompt.text.contains("4.33 / 5"));
        assert!(prompt.text.contains("Thanks: 2"));
        assert!(prompt.text.contains("https://example.com/sheet"));
    }

    #[test]
    fn empty_statistics_has_friendly_message() {
        let prompt = statistics(&StatisticsSnapshot::default(), None);
        assert!(prompt.text.contains("No feedback"));
    }
}
