use client_core::{
    form_view::{FormPhase, FormView},
    list_view::{format_date, format_price, ListView},
    validation::Field,
};
use shared::domain::{BadgeColor, Genre};

const RESET: &str = "\x1b[0m";
const TITLE_WIDTH: usize = 32;

fn paint(text: &str, color: BadgeColor, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{text}{RESET}", color.ansi_code())
    } else {
        text.to_string()
    }
}

/// Pads before painting so escape codes do not break column alignment.
fn genre_cell(genre: Genre, color: bool) -> String {
    paint(&format!("{:<14}", genre.label()), genre.badge().color, color)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

pub fn list(view: &ListView, color: bool) -> String {
    let mut out = String::from("Video Games\n\n");
    if view.is_loading() {
        out.push_str("Loading video games...\n");
        return out;
    }
    if let Some(error) = view.error() {
        out.push_str(&paint(&format!("Error: {error}"), BadgeColor::Danger, color));
        out.push('\n');
        return out;
    }
    if view.items().is_empty() {
        out.push_str("No video games found.\n");
        if view.total_count() > 0 {
            out.push_str(&format!(
                "Page {} is past the end ({} pages).\n",
                view.page_number(),
                view.total_pages()
            ));
        }
        return out;
    }

    out.push_str(&format!(
        "{:>5}  {:<TITLE_WIDTH$}  {:<20}  {:<14}  {:<10}  {:>8}  {:>6}  {}\n",
        "ID", "Title", "Publisher", "Genre", "Released", "Price", "Rating", "Status"
    ));
    for game in view.items() {
        let status = if game.is_active {
            paint("Active", BadgeColor::Success, color)
        } else {
            paint("Inactive", BadgeColor::Secondary, color)
        };
        out.push_str(&format!(
            "{:>5}  {:<TITLE_WIDTH$}  {:<20}  {}  {:<10}  {:>8}  {:>6}  {}\n",
            game.id,
            truncate(&game.title, TITLE_WIDTH),
            truncate(&game.publisher, 20),
            genre_cell(game.genre, color),
            format_date(game.release_date),
            format_price(game.price),
            game.rating,
            status
        ));
    }

    let (from, to) = view.showing_range();
    out.push_str(&format!(
        "\nShowing {from}-{to} of {} | Page {} of {}\n",
        view.total_count(),
        view.page_number(),
        view.total_pages()
    ));
    out
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Title => "Title",
        Field::Publisher => "Publisher",
        Field::Developer => "Developer",
        Field::ReleaseDate => "Release Date",
        Field::Genre => "Genre",
        Field::Price => "Price",
        Field::Description => "Description",
        Field::Rating => "Rating",
        Field::CoverImageUrl => "Cover Image URL",
        Field::IsActive => "Active",
    }
}

fn value(form: &FormView, field: Field, color: bool) -> String {
    let draft = form.draft();
    match field {
        Field::Title => draft.title.clone(),
        Field::Publisher => draft.publisher.clone(),
        Field::Developer => draft.developer.clone(),
        Field::ReleaseDate => draft
            .release_date
            .map(|date| date.to_string())
            .unwrap_or_default(),
        Field::Genre => draft
            .genre
            .map(|genre| paint(genre.label(), genre.badge().color, color))
            .unwrap_or_default(),
        Field::Price => draft.price.map(format_price).unwrap_or_default(),
        Field::Description => draft.description.clone(),
        Field::Rating => draft.rating.map(|r| r.to_string()).unwrap_or_default(),
        Field::CoverImageUrl => draft.cover_image_url.clone(),
        Field::IsActive => (if draft.is_active { "yes" } else { "no" }).to_string(),
    }
}

/// Error and success banners only.
pub fn status(form: &FormView, color: bool) -> String {
    let mut out = String::new();
    if let Some(error) = form.error() {
        out.push_str(&paint(&format!("Error: {error}"), BadgeColor::Danger, color));
        out.push('\n');
    }
    if let Some(message) = form.success_message() {
        out.push_str(&paint(message, BadgeColor::Success, color));
        out.push_str(" Redirecting to the list...\n");
    }
    out
}

pub fn form(form: &FormView, color: bool) -> String {
    let heading = match form.game_id() {
        Some(id) => format!("Edit Video Game #{id}"),
        None if form.phase() == FormPhase::Invalid => "Edit Video Game".to_string(),
        None => "Add New Video Game".to_string(),
    };
    let mut out = format!("{heading}\n\n");
    if form.loading() {
        out.push_str("Loading...\n");
        return out;
    }
    out.push_str(&status(form, color));
    if form.phase() == FormPhase::Invalid {
        return out;
    }

    let inline = form.inline_errors();
    for field in Field::ALL {
        if field == Field::IsActive && !form.is_edit_mode() {
            continue;
        }
        out.push_str(&format!("  {:<16} {}\n", label(field), value(form, field, color)));
        if let Some((_, message)) = inline.iter().find(|(f, _)| *f == field) {
            out.push_str(&format!(
                "  {:<16} {}\n",
                "",
                paint(&format!("! {message}"), BadgeColor::Danger, color)
            ));
        }
    }
    out
}
