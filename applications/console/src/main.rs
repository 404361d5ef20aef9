/// Gallery Console - album admin from the command line
use anyhow::Context;
use clap::{Parser, Subcommand};
use gallery_cli::{render, AlbumChanges, Authenticator, Console, ConsoleConfig};
use gallery_console::SessionContext;
use gallery_core::{AlbumId, NotificationKind, Session};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gallery-console")]
#[command(about = "Manage photo albums and their images", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./gallery.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List albums
    List {
        /// Show every image instead of the first few
        #[arg(long)]
        all: bool,
    },
    /// Create an album
    Add {
        #[arg(long)]
        title: String,
        /// Album type, e.g. "Travel"
        #[arg(long = "type")]
        album_type: String,
        /// Album date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Image file to upload (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Change an existing album
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "type")]
        album_type: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Image file to upload and append (repeatable)
        #[arg(long = "add-image")]
        add_images: Vec<PathBuf>,
        /// Index of an image to drop from the album (repeatable)
        #[arg(long = "remove-image")]
        remove_images: Vec<usize>,
    },
    /// Delete an album and its stored images
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Start a session
    Login {
        #[arg(short, long, env = "GALLERY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the session
    Logout,
    /// Print a bcrypt hash for `session.password_hash`
    HashPassword { password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gallery_cli=info,gallery_console=info,gallery_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Commands::HashPassword { password } = &cli.command {
        println!("{}", Authenticator::hash_password(password)?);
        return Ok(());
    }

    let config = ConsoleConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::List { all } => {
            let mut console = Console::open(&config).await?;
            if all {
                console.expand_all();
            }
            print!("{}", render::cards(&console.cards()));
            flush_notifications(&console);
        }
        Commands::Add {
            title,
            album_type,
            date,
            images,
        } => {
            let mut console = Console::open(&config).await?;
            let changes = AlbumChanges {
                title: Some(title),
                album_type: Some(album_type),
                date,
                add_images: images,
                remove_images: Vec::new(),
            };
            let result = console.add(changes).await;
            flush_notifications(&console);
            let album = result?;
            println!("{} image(s) in \"{}\"", album.img.len(), album.title);
        }
        Commands::Edit {
            id,
            title,
            album_type,
            date,
            add_images,
            remove_images,
        } => {
            let mut console = Console::open(&config).await?;
            let changes = AlbumChanges {
                title,
                album_type,
                date,
                add_images,
                remove_images,
            };
            let result = console.edit(&AlbumId::new(id), changes).await;
            flush_notifications(&console);
            result?;
        }
        Commands::Delete { id, yes } => {
            let mut console = Console::open(&config).await?;
            let id = AlbumId::new(id);

            let Some(album) = console.album(&id) else {
                anyhow::bail!("Album not found: {}", id);
            };
            let prompt = format!(
                "Delete \"{}\" and its {} image(s)? [y/N] ",
                album.title,
                album.img.len()
            );
            if !yes && !confirm(&prompt)? {
                println!("Cancelled");
                return Ok(());
            }

            let result = console.delete(&id).await;
            flush_notifications(&console);
            result?;
        }
        Commands::Login { password } => {
            let session = SessionContext::init(&config.session.path)?;
            Authenticator::new(config.session.password_hash.clone()).login(&session, &password)?;
            println!("Logged in");
        }
        Commands::Logout => {
            let session = SessionContext::init(&config.session.path)?;
            session.logout()?;
            println!("Logged out");
        }
        Commands::HashPassword { .. } => {}
    }

    Ok(())
}

fn flush_notifications(console: &Console) {
    for notification in console.take_notifications() {
        let line = render::notification(&notification);
        match notification.kind {
            NotificationKind::Success => println!("{}", line),
            NotificationKind::Error => eprintln!("{}", line),
        }
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
