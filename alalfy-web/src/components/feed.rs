use alalfy_core::display_feed_date;
use alalfy_core::pages::{FEED_NOTHING_FOUND, FeedSection};
use leptos::prelude::*;

/// Cross-posted articles; links leave the site in a new tab.
#[component]
pub(crate) fn FeedList(feed: FeedSection) -> impl IntoView {
    if feed.is_empty() {
        return view! { <p class="centered">{FEED_NOTHING_FOUND}</p> }.into_any();
    }

    view! {
        <div class="grid">
            {feed
                .items
                .into_iter()
                .map(|item| {
                    let date = display_feed_date(&item.published);
                    let thumbnail = item.thumbnail.map(|src| {
                        view! { <img src=src alt=item.title.clone() loading="lazy" /> }
                    });
                    // unsafe links were blanked while normalizing
                    let title = if item.link.is_empty() {
                        view! { <span>{item.title}</span> }.into_any()
                    } else {
                        view! {
                            <a href=item.link target="_blank" rel="noopener noreferrer">
                                {item.title}
                            </a>
                        }
                        .into_any()
                    };
                    view! {
                        <article class="card">
                            {thumbnail}
                            <h3>{title}</h3>
                            <time>{date}</time>
                            <p>{item.description}</p>
                        </article>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}
