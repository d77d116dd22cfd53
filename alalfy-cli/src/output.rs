use alalfy_core::pages::{
    CATEGORY_EMPTY, CategoryPage, CategorySection, FEED_NOTHING_FOUND, FeedSection, HomePage, Navigation,
    PageFailure, PostPage,
};
use alalfy_core::{Category, Post, display_feed_date};

pub fn print_home(home: &HomePage) {
    if let Some(hero) = home.hero_post() {
        println!("== {} ==", hero.title);
        print_teaser(hero);
        println!();
    }
    print_post_list("Featured", &home.featured);
    print_post_list("Latest", &home.latest);
}

pub fn print_sections(sections: &[CategorySection]) {
    if sections.is_empty() {
        println!("(no categories)");
    }
    for section in sections {
        print_post_list(&section_title(&section.category), &section.posts);
    }
}

pub fn print_category(page: &CategoryPage, html: bool) {
    println!("{}", section_title(&page.category));
    if !page.category.short_description.is_empty() {
        println!("{}", page.category.short_description);
    }
    if html {
        println!("{}", page.description_html);
    } else {
        let text = alalfy_render::to_plain_text(&page.category.description);
        if !text.is_empty() {
            println!("{text}");
        }
    }
    println!();
    if page.is_empty() {
        println!("{CATEGORY_EMPTY}");
        return;
    }
    print_post_list("Posts", &page.posts);
}

pub fn print_post(page: &PostPage, html: bool) {
    let post = &page.post;
    println!("{}", post.title);
    println!("by {} <{}> in {}", post.author.name, post.author.email, post.category.name);
    if !post.short_description.is_empty() {
        println!("{}", post.short_description);
    }
    if !post.banner.is_empty() {
        println!("banner: {}", post.banner);
    }
    println!();
    if html {
        println!("{}", page.body_html);
    } else {
        println!("{}", alalfy_render::to_plain_text(&post.description));
    }
}

pub fn print_feed(feed: &FeedSection) {
    if feed.is_empty() {
        println!("{FEED_NOTHING_FOUND}");
        return;
    }
    for (position, item) in feed.items.iter().enumerate() {
        println!("{}. {}", position + 1, item.title);
        println!("   {}", display_feed_date(&item.published));
        println!("   {}", item.link);
        if !item.description.is_empty() {
            println!("   {}", item.description);
        }
    }
}

pub fn print_navigation(nav: &Navigation) {
    print_category_links("Header", &nav.header);
    print_category_links("Footer", &nav.footer);
}

pub fn print_failure(failure: &PageFailure) {
    eprintln!("{}", failure.title);
    eprintln!("{}", failure.message);
    eprintln!("[{}]", failure.recovery().label());
}

fn print_post_list(title: &str, posts: &[Post]) {
    println!("{title} ({})", posts.len());
    for post in posts {
        println!("- [{}] {} ({})", post.id, post.title, post.slug);
    }
    println!();
}

fn print_teaser(post: &Post) {
    if !post.short_description.is_empty() {
        println!("{}", post.short_description);
    }
    println!("slug: {}", post.slug);
}

fn print_category_links(title: &str, categories: &[Category]) {
    println!("{title}:");
    for category in categories {
        println!("  {} -> #/category/{}", category.name, category.slug);
    }
}

fn section_title(category: &Category) -> String {
    format!("{} [{}]", category.name, category.slug)
}
