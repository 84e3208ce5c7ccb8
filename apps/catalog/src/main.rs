use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    config::load_settings,
    draft::{DatePickerValue, GameDraft},
    navigation::{AlwaysConfirm, Confirm},
    validation::Field,
    HttpCatalogClient,
};
use shared::domain::Genre;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod prompt;
mod render;
mod shell;

use prompt::StdinConfirm;
use shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse and edit the video game catalog")]
struct Cli {
    /// Catalog backend root, e.g. http://localhost:5000
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Settings file (defaults to ./catalog.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of the catalog
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Resolve a path such as /games/7/edit and show that screen
    Open { path: String },
    /// Add a video game
    New {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Load a video game, apply the given changes and save it
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a video game after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct FieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    developer: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    release_date: Option<DatePickerValue>,
    /// Genre label (e.g. "Strategy") or numeric code
    #[arg(long)]
    genre: Option<Genre>,
    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    rating: Option<i64>,
    #[arg(long)]
    cover_image_url: Option<String>,
}

impl FieldArgs {
    /// Writes every supplied value into `draft` and returns the fields it touched.
    fn apply(self, draft: &mut GameDraft) -> Vec<Field> {
        let mut touched = Vec::new();
        if let Some(title) = self.title {
            draft.title = title;
            touched.push(Field::Title);
        }
        if let Some(publisher) = self.publisher {
            draft.publisher = publisher;
            touched.push(Field::Publisher);
        }
        if let Some(developer) = self.developer {
            draft.developer = developer;
            touched.push(Field::Developer);
        }
        if let Some(release_date) = self.release_date {
            draft.release_date = Some(release_date);
            touched.push(Field::ReleaseDate);
        }
        if let Some(genre) = self.genre {
            draft.genre = Some(genre);
            touched.push(Field::Genre);
        }
        if let Some(price) = self.price {
            draft.price = Some(price);
            touched.push(Field::Price);
        }
        if let Some(description) = self.description {
            draft.description = description;
            touched.push(Field::Description);
        }
        if let Some(rating) = self.rating {
            draft.rating = Some(rating);
            touched.push(Field::Rating);
        }
        if let Some(cover_image_url) = self.cover_image_url {
            draft.cover_image_url = cover_image_url;
            touched.push(Field::CoverImageUrl);
        }
        touched
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded =
        load_settings(cli.config.as_deref()).context("failed to load catalog settings")?;
    let mut settings = loaded.settings.clone();
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    if let Some(page_size) = cli.page_size.filter(|size| *size > 0) {
        settings.page_size = page_size;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    loaded.log_rejected();
    info!(api_url = %settings.api_url, page_size = settings.page_size, "catalog: starting");

    let api = HttpCatalogClient::new(&settings.api_url)
        .with_context(|| format!("invalid api url '{}'", settings.api_url))?;
    let color = io::stdout().is_terminal();
    let mut shell = Shell::new(Arc::new(api), settings.page_size, io::stdout(), color);

    let ok = match cli.command {
        Command::List { page } => shell.list(page).await?,
        Command::Open { path } => shell.open(&path).await?,
        Command::New { fields } => {
            shell
                .create(|draft: &mut GameDraft| fields.apply(draft))
                .await?
        }
        Command::Edit {
            id,
            fields,
            active,
            inactive,
        } => {
            let is_active = match (active, inactive) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            shell
                .edit(&id, |draft: &mut GameDraft| {
                    let mut touched = fields.apply(draft);
                    if let Some(is_active) = is_active {
                        draft.is_active = is_active;
                        touched.push(Field::IsActive);
                    }
                    touched
                })
                .await?
        }
        Command::Delete { id, yes } => {
            let confirm: Box<dyn Confirm> = if yes {
                Box::new(AlwaysConfirm)
            } else {
                Box::new(StdinConfirm)
            };
            shell.delete(&id, confirm.as_ref()).await?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
