//! Listings projected from validated collections
//!
//! A projection filters a collection with a visibility predicate and sorts
//! the survivors by a key. Sorting is stable, so records with equal keys
//! keep their collection order. Projections borrow from the collection and
//! never modify it.
//!
//! [`published_posts`] is the single definition of what the public blog
//! shows; the blog listing and the RSS feed both go through it.

use super::blog::BlogPost;
use super::garden::{GardenNote, Maturity};
use super::project::{Project, ProjectType};
use super::work::WorkEntry;

/// Sort direction of a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Filters `items` by `visible` and stably sorts the result by `key`
pub fn project<'a, T, K, V, F>(items: &'a [T], visible: V, key: F, order: Order) -> Vec<&'a T>
where
    K: Ord,
    V: Fn(&T) -> bool,
    F: Fn(&'a T) -> K,
{
    let mut out: Vec<&'a T> = items.iter().filter(|item| visible(*item)).collect();

    match order {
        Order::Ascending => out.sort_by(|a, b| key(*a).cmp(&key(*b))),
        Order::Descending => out.sort_by(|a, b| key(*b).cmp(&key(*a))),
    }

    out
}

/// Published posts, most recent first
pub fn published_posts(posts: &[BlogPost]) -> Vec<&BlogPost> {
    project(posts, BlogPost::is_published, |p| p.pub_date, Order::Descending)
}

/// Every post including drafts, most recent first
pub fn all_posts(posts: &[BlogPost]) -> Vec<&BlogPost> {
    project(posts, |_| true, |p| p.pub_date, Order::Descending)
}

/// Published posts carrying `tag`, in blog listing order
pub fn posts_tagged<'a>(posts: &'a [BlogPost], tag: &str) -> Vec<&'a BlogPost> {
    with_tag(published_posts(posts), tag)
}

/// Narrows an already projected listing to posts carrying `tag`
pub fn with_tag<'a>(listing: Vec<&'a BlogPost>, tag: &str) -> Vec<&'a BlogPost> {
    listing.into_iter().filter(|p| p.has_tag(tag)).collect()
}

/// Distinct tags of published posts with their post counts, by tag name
pub fn tag_counts(posts: &[BlogPost]) -> Vec<(String, usize)> {
    let mut counts = std::collections::BTreeMap::new();
    for post in published_posts(posts) {
        for tag in &post.tags {
            *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Projects of the given type (or all), featured first
pub fn project_showcase(projects: &[Project], kind: Option<ProjectType>) -> Vec<&Project> {
    project(
        projects,
        |p| kind.map_or(true, |k| p.project_type == k),
        |p| p.featured,
        Order::Descending,
    )
}

/// Work history, most recent start first
pub fn work_timeline(entries: &[WorkEntry]) -> Vec<&WorkEntry> {
    project(entries, |_| true, |e| e.start_date, Order::Descending)
}

/// Garden notes of the given maturity (or all), by title
pub fn garden_index(notes: &[GardenNote], maturity: Option<Maturity>) -> Vec<&GardenNote> {
    project(
        notes,
        |n| maturity.map_or(true, |m| n.maturity == m),
        |n| n.title.to_lowercase(),
        Order::Ascending,
    )
}
