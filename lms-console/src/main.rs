//! lms-console: command-line front end for the LMS admin API
//!
//! # Environment variables
//!
//! Each one can also be given as the matching flag (`--api-url`, ...).
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | LMS_API_URL | http://localhost:3000 | Admin API base URL |
//! | LMS_TIMEOUT_SECS | 30 | Per-request timeout |
//! | LMS_SESSION_FILE | .lms/session.json | Session kept between runs |
//! | LMS_LOG_LEVEL | warn | Filter when `RUST_LOG` is unset |
//! | LMS_LOG_JSON | false | JSON log lines |
//! | LMS_LOG_DIR | (none) | Also log to a daily rotating file here |

mod cli;
mod logger;

use anyhow::Context;
use clap::Parser;
use lms_client::{AdminClient, ClientError, FileUpload, LessonScope, ReorderError, ReorderOutcome};
use shared::Ordered;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file before clap reads the environment
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    logger::init_logger_with_file(&cli.log_level, cli.log_json, cli.log_dir.as_deref())?;

    let config = cli.client_config();
    tracing::debug!(base_url = %config.base_url, "Starting lms-console");
    let client = config.build_client()?;

    if let Err(e) = run(&client, cli.command).await {
        if needs_login(&e) {
            // Drop the rejected session from disk too
            client.logout()?;
            eprintln!("Session expired, run `lms-console login` again.");
        } else if e
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_transport)
        {
            eprintln!("Could not reach {}", config.base_url);
        }
        return Err(e);
    }
    Ok(())
}

fn needs_login(err: &anyhow::Error) -> bool {
    if let Some(e) = err.downcast_ref::<ClientError>() {
        return e.requires_login();
    }
    err.downcast_ref::<ReorderError>()
        .is_some_and(ReorderError::requires_login)
}

async fn run(client: &AdminClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = client.login(&email, &password).await?;
            println!("Logged in as {} <{}> ({})", user.name, user.email, user.role);
        }

        Command::Logout => {
            client.logout()?;
            println!("Logged out");
        }

        Command::Whoami => match client.session().user() {
            Some(user) => println!("{} <{}> ({}) id={}", user.name, user.email, user.role, user.id),
            None => println!("Not logged in"),
        },

        Command::Categories => {
            for category in client.categories().list().await? {
                let courses = category.count.map(|c| c.courses).unwrap_or(0);
                println!("{}  {} ({courses} courses)", category.id, category.name);
            }
        }

        Command::Courses => {
            for course in client.courses().list().await? {
                let category = course
                    .categories
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .unwrap_or("-");
                println!("{}  {} [{category}]", course.id, course.title);
            }
        }

        Command::Modules { course_id } => {
            let store = client.module_store();
            print_list(&store.open(course_id).await?, |m| m.title.as_str());
        }

        Command::Lessons {
            course_id,
            module_id,
        } => {
            let store = client.lesson_store();
            let lessons = store.open(LessonScope::new(course_id, module_id)).await?;
            print_list(&lessons, |l| l.title.as_str());
        }

        Command::ReorderModule {
            course_id,
            module_id,
            position,
        } => {
            let store = client.module_store();
            store
                .open(course_id)
                .await
                .context("Failed to load modules")?;
            let outcome = store.reorder(&module_id, position).await?;
            report(&outcome);
            print_list(&store.snapshot(), |m| m.title.as_str());
        }

        Command::ReorderLesson {
            course_id,
            module_id,
            lesson_id,
            position,
        } => {
            let store = client.lesson_store();
            store
                .open(LessonScope::new(course_id, module_id))
                .await
                .context("Failed to load lessons")?;
            let outcome = store.reorder(&lesson_id, position).await?;
            report(&outcome);
            print_list(&store.snapshot(), |l| l.title.as_str());
        }

        Command::UploadMaterial {
            course_id,
            module_id,
            lesson_id,
            file,
            mime,
        } => {
            let mut upload = FileUpload::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if let Some(mime) = mime {
                upload = upload.with_mime(mime);
            }
            let lesson = client
                .lessons()
                .upload_material(&LessonScope::new(course_id, module_id), &lesson_id, upload)
                .await?;
            println!(
                "Uploaded to {}: {}",
                lesson.id,
                lesson.material_url.as_deref().unwrap_or("-")
            );
        }

        Command::Stats => {
            let stats = client.dashboard().stats().await?;
            let o = &stats.overview;
            println!(
                "Courses {}  Modules {}  Lessons {}  Categories {}",
                o.total_courses, o.total_modules, o.total_lessons, o.total_categories
            );
            println!(
                "Enrollments {} ({} active, {} in the last 30 days)",
                o.total_enrollments,
                o.active_enrollments,
                stats.recent_activity.enrollments_last30_days
            );
            println!("Reviews {}  Average rating {:.1}", o.total_reviews, o.average_rating);
            for course in &stats.top_courses {
                println!(
                    "  {}  {} enrollments, {:.1} stars",
                    course.title, course.enrollment_count, course.avg_rating
                );
            }
        }

        Command::Results { kind, id } => {
            for result in client.quizzes().results(&kind.scope(id)).await? {
                println!(
                    "{} {} <{}>  {:.0}%  {}  {}",
                    result.first_name,
                    result.surname,
                    result.email,
                    result.score,
                    if result.passed { "passed" } else { "failed" },
                    result.completed_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }
    Ok(())
}

fn print_list<T: Ordered>(items: &[T], title: impl Fn(&T) -> &str) {
    if items.is_empty() {
        println!("(empty)");
    }
    for item in items {
        println!("{:>3}. {}  {}", item.position(), title(item), item.id());
    }
}

fn report<T: Ordered>(outcome: &ReorderOutcome<T>) {
    match outcome {
        ReorderOutcome::Unchanged => println!("Already at that position"),
        ReorderOutcome::Applied(item) => {
            println!("Moved {} to position {}", item.id(), item.position())
        }
        ReorderOutcome::Superseded => println!("A newer move took precedence"),
    }
}
