use std::sync::Arc;

use clap::{Parser, Subcommand};
use trilha::api::CourseApi;
use trilha::catalog::CatalogController;
use trilha::error::{AppResult, run_with_error_handler};
use trilha::model::entity::{Course, Lesson, LessonContent, LessonKey, YOUTUBE_PROVIDER};
use trilha::player::{Advance, CourseTree, Direction, LessonNavigator, complete_lesson};
use trilha::utils::{AssetResolver, format_duration, title_from_slug, youtube_embed_url};
use trilha::{Config, build_client, setup_trace};

#[derive(Parser, Debug)]
#[command(about = "Browse the course catalog and walk through lessons", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a catalog page
    Catalog {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Filter courses by name
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Show a course with its modules
    Course { slug: String },

    /// Show the lessons of a module
    Module { course: String, module: String },

    /// Walk through a course lesson by lesson
    Play {
        course: String,
        /// Module to open; requires --lesson
        #[arg(long, requires = "lesson")]
        module: Option<String>,
        #[arg(long, requires = "module")]
        lesson: Option<String>,
        /// Number of moves to make after opening
        #[arg(long, default_value_t = 0)]
        steps: u32,
        /// Move backwards instead of forwards
        #[arg(long, default_value_t = false)]
        back: bool,
    },

    /// Mark a lesson as completed
    Complete {
        course: String,
        module: String,
        lesson: String,
    },
}

#[tokio::main]
#[tracing::instrument]
async fn main() {
    setup_trace();
    run_with_error_handler(run).await;
}

#[tracing::instrument]
async fn run() -> AppResult<()> {
    let args = Cli::parse();
    tracing::debug!("running {:?}", args.command);
    let api = build_client().await?;
    let config = Config::get_or_init(cfg!(debug_assertions)).await;
    let assets = AssetResolver::from_config(config);

    match args.command {
        Commands::Catalog { page, filter } => {
            let catalog = CatalogController::new(api, config.catalog().page_size());
            let mut outcome = catalog.set_filter(filter).await;
            if page > 1 {
                outcome.clone().into_result()?;
                outcome = catalog.request_page(page).await?;
            }

            let Some(shown) = outcome.into_result()? else {
                return Ok(());
            };
            if shown.is_empty() {
                println!("No courses found.");
            }
            for course in &shown.items {
                print_course(course, &assets);
            }
            println!("page {}/{} ({} courses)", shown.page, shown.total_pages, shown.total_items);
        }

        Commands::Course { slug } => {
            let details = api.fetch_course(&slug).await?;
            print_course(details.course(), &assets);
            if let Some(intro) = details.introduction().filter(|i| i.has_summary()) {
                println!("  intro: {} ({})", intro.title(), format_duration(intro.duration_minutes()));
                match intro.video_id() {
                    Some(video_id) if intro.provider().eq_ignore_ascii_case(YOUTUBE_PROVIDER) => {
                        println!("    {}", youtube_embed_url(video_id))
                    }
                    Some(video_id) => println!("    video ({}): {}", intro.provider(), video_id),
                    None => {}
                }
            }
            for (i, module) in details.modules().iter().enumerate() {
                println!(
                    "  {}. {} [{}] {} lessons, {}",
                    i + 1,
                    module.title(),
                    module.slug(),
                    module.lessons_count(),
                    format_duration(module.duration_minutes())
                );
            }
            println!("start: {}", details.player_entry().path());
        }

        Commands::Module { course, module } => {
            let details = api.fetch_module(&course, &module).await?;
            println!("{} [{}/{}]", details.module().title(), details.course_slug(), module);
            for (i, lesson) in details.lessons().iter().enumerate() {
                print!("  {}. ", i + 1);
                print_lesson(lesson, &assets);
            }
        }

        Commands::Play {
            course,
            module,
            lesson,
            steps,
            back,
        } => {
            let tree = Arc::new(CourseTree::open(Arc::clone(&api), &course).await?);
            let navigator = match (module, lesson) {
                (Some(module), Some(lesson)) => {
                    LessonNavigator::open_at(tree, &module, &lesson).await?
                }
                _ => LessonNavigator::start(tree).await?,
            };

            let Some(position) = navigator.position() else {
                println!("{} has no lessons yet.", title_from_slug(&course));
                return Ok(());
            };
            print_lesson(position.lesson(), &assets);

            let direction = if back { Direction::Previous } else { Direction::Next };
            for _ in 0..steps {
                match navigator.advance(direction).await? {
                    Advance::Moved(position) => {
                        print!("{} > ", position.module().title());
                        print_lesson(position.lesson(), &assets);
                    }
                    Advance::AtBoundary | Advance::Busy => break,
                }
            }

            println!(
                "previous: {}, next: {}",
                navigator.has_previous(),
                navigator.has_next()
            );
        }

        Commands::Complete {
            course,
            module,
            lesson,
        } => {
            let key = LessonKey::new(course, module, lesson);
            let notice = complete_lesson(api.as_ref(), &key).await;
            println!("{}", notice.message);
        }
    }

    Ok(())
}

fn print_course(course: &Course, assets: &AssetResolver) {
    let price = if course.is_free() { "free" } else { "paid" };
    println!(
        "{} [{}] {}, {}",
        course.title(),
        course.slug(),
        format_duration(course.duration_minutes()),
        price
    );
    let instructors: Vec<&str> = course.instructors().iter().map(|i| i.name()).collect();
    if !instructors.is_empty() {
        println!("  by {}", instructors.join(", "));
    }
    if !course.thumbnail_url().is_empty() {
        println!("  {}", assets.resolve(course.thumbnail_url()));
    }
}

fn print_lesson(lesson: &Lesson, assets: &AssetResolver) {
    println!(
        "{} [{}] {}",
        lesson.title(),
        lesson.slug(),
        format_duration(lesson.duration_minutes())
    );
    match lesson.content() {
        LessonContent::Video { provider, video_id } => match lesson.content().embed_url() {
            Some(url) => println!("    video: {url}"),
            None => println!("    video ({provider}): {video_id}"),
        },
        LessonContent::Text { markdown } => println!("    text: {} chars", markdown.chars().count()),
        LessonContent::Unsupported { provider } => println!("    unsupported content ({provider})"),
    }
    for file in lesson.files() {
        println!("    file: {} {}", file.name(), assets.resolve(file.url()));
    }
}
