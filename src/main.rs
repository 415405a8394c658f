use clap::Parser;
use lactonourish_site::app::pages::blog::{
    excerpt, FEATURED_EXCERPT_CHARS, LISTING_EXCERPT_CHARS, NO_RESULTS_MESSAGE,
};
use lactonourish_site::app::pages::blog_post::{NOT_FOUND_MESSAGE, NOT_FOUND_TITLE};
use lactonourish_site::app::pages::{
    AppointmentPage, BlogPage, BlogPostPage, DetailState, HomePage, ServicesPage,
};
use lactonourish_site::app::routes::{Resolution, Route};
use lactonourish_site::config::{CliConfig, Command, SiteConfig};
use lactonourish_site::utils::date::format_long;
use lactonourish_site::utils::{logger, validation::Validate};
use lactonourish_site::{
    BlogPost, ContentError, ContentRecord, ContentRepository, ContentStore, DetailResolver,
    HttpContentStore, InMemoryContentStore,
};
use serde::Serialize;
use std::sync::Arc;

type Store = Arc<dyn ContentStore>;

fn fail(e: &ContentError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn build_store(config: &CliConfig, site: &SiteConfig) -> Result<Store, ContentError> {
    match &config.fixture {
        Some(path) => {
            tracing::info!("Serving content from fixture {}", path.display());
            Ok(Arc::new(InMemoryContentStore::from_json_file(path)?))
        }
        None => {
            tracing::info!("Using content store at {}", site.store.endpoint);
            Ok(Arc::new(HttpContentStore::from_config(site)?))
        }
    }
}

fn repository(config: &CliConfig, site: &SiteConfig) -> Result<ContentRepository<Store>, ContentError> {
    Ok(ContentRepository::new(build_store(config, site)?))
}

fn print_route(path: &str, site: &SiteConfig) {
    match Route::resolve(path) {
        Resolution::Page(Route::Appointment) => {
            let page = AppointmentPage::new(&site.site.scheduler_url, &site.site.scheduler_script_url);
            println!("/appointment (scheduler: {})", page.booking_url());
        }
        Resolution::Page(route) => println!("{}", route),
        Resolution::Redirect(route) => println!("{} -> {}", path, route),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!("Could not serialize output: {}", e),
    }
}

fn print_list<T: ContentRecord>(records: &[&T]) {
    for record in records {
        let headline = record.headline().unwrap_or("(untitled)");
        match record.category() {
            Some(category) => println!("  [{}] {} ({})", record.id(), headline, category),
            None => println!("  [{}] {}", record.id(), headline),
        }
    }
}

fn print_post(post: &BlogPost, related: &[BlogPost]) {
    if let Some(category) = &post.category {
        println!("[{}]", category);
    }
    println!("{}", post.title.as_deref().unwrap_or("(untitled)"));
    if let Some(date) = &post.publish_date {
        println!("{}", format_long(date));
    }
    if let Some(image) = &post.featured_image {
        println!("Image: {}", image);
    }
    if let Some(content) = &post.content {
        println!();
        println!("{}", content);
    }
    if !related.is_empty() {
        println!();
        println!("Related Articles");
        let related: Vec<&BlogPost> = related.iter().collect();
        print_list(&related);
    }
}

async fn run(config: &CliConfig, site: &SiteConfig) -> Result<(), ContentError> {
    match &config.command {
        Command::Route { path } => print_route(path, site),
        Command::Blog { category, query } => {
            let mut page = BlogPage::new(repository(config, site)?)
                .with_categories(site.site.blog_categories.clone());
            page.load().await;
            page.select_category(category);
            page.set_query(query);

            let posts = page.filtered();
            if config.json {
                print_json(&posts);
            } else if page.shows_no_results() {
                println!("{}", NO_RESULTS_MESSAGE);
            } else {
                println!("Categories: {}", page.categories().join(" | "));
                if let Some(featured) = page.featured() {
                    println!();
                    println!("Featured: {}", featured.title.as_deref().unwrap_or("(untitled)"));
                    if let Some(content) = &featured.content {
                        println!("  {}", excerpt(content, FEATURED_EXCERPT_CHARS));
                    }
                    println!();
                }
                for post in posts {
                    print_list(&[post]);
                    if let Some(content) = &post.content {
                        println!("      {}", excerpt(content, LISTING_EXCERPT_CHARS));
                    }
                }
            }
        }
        Command::Post { id } => {
            let resolver = DetailResolver::new(repository(config, site)?)
                .with_limits(site.listing.related_fetch_limit, site.listing.related_max);
            let mut page = BlogPostPage::new(resolver);
            match page.load(id).await {
                DetailState::Found { post, related } => {
                    if config.json {
                        print_json(&serde_json::json!({ "post": post, "related": related }));
                    } else {
                        print_post(post, related);
                    }
                }
                DetailState::NotFound => {
                    println!("{}", NOT_FOUND_TITLE);
                    println!("{}", NOT_FOUND_MESSAGE);
                }
                DetailState::Loading => {}
            }
        }
        Command::Services { query } => {
            let mut page = ServicesPage::new(repository(config, site)?);
            page.load().await;
            page.set_query(query);

            let services = page.filtered();
            if config.json {
                print_json(&services);
            } else {
                for service in services {
                    let title = service.title.as_deref().unwrap_or("(untitled)");
                    match &service.price {
                        Some(price) => println!("  {} - {}", title, price),
                        None => println!("  {}", title),
                    }
                    if let Some(summary) = &service.short_summary {
                        println!("    {}", summary);
                    }
                }
            }
        }
        Command::Home => {
            let mut page = HomePage::new(repository(config, site)?).with_limits(site.listing.home_limits());
            page.load().await;
            if config.json {
                print_json(&serde_json::json!({
                    "faqs": page.faqs(),
                    "latestPosts": page.latest_posts(),
                    "testimonials": page.testimonials(),
                }));
            } else {
                println!("Frequently Asked Questions");
                for faq in page.faqs() {
                    println!("  Q: {}", faq.question.as_deref().unwrap_or(""));
                    println!("  A: {}", faq.answer.as_deref().unwrap_or(""));
                }
                println!();
                println!("Latest from the Blog");
                let posts: Vec<&BlogPost> = page.latest_posts().iter().collect();
                print_list(&posts);
                println!();
                println!("What Parents Say");
                for testimonial in page.testimonials() {
                    println!(
                        "  \"{}\" - {}",
                        testimonial.testimonial_text.as_deref().unwrap_or(""),
                        testimonial.client_name.as_deref().unwrap_or("Anonymous")
                    );
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let site = config.site_config().unwrap_or_else(|e| fail(&e));
    if let Err(e) = site.validate() {
        fail(&e);
    }

    if let Err(e) = run(&config, &site).await {
        fail(&e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lactonourish_site::utils::error::ErrorCategory;

    #[tokio::test]
    async fn test_route_needs_no_store() {
        let config = CliConfig::parse_from([
            "lactonourish",
            "--fixture",
            "/definitely/not/here/content.json",
            "route",
            "/Blog/a%20b",
        ]);
        let site = config.site_config().unwrap();
        assert!(run(&config, &site).await.is_ok());
    }

    #[tokio::test]
    async fn test_content_commands_report_store_errors() {
        let config = CliConfig::parse_from([
            "lactonourish",
            "--fixture",
            "/definitely/not/here/content.json",
            "home",
        ]);
        let site = config.site_config().unwrap();
        let err = run(&config, &site).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Data);
    }
}
