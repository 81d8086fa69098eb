//! Integration tests for site resolution by hostname and by page path.

use lingua_core::page_hooks::PageInitHooks;
use lingua_db::models::page::{CreatePage, Page};
use lingua_db::repositories::{PageRepo, SiteRepo};
use sqlx::PgPool;

async fn create_page(pool: &PgPool, parent_id: i64, slug: &str, page_type: &str) -> Page {
    PageRepo::create_child(
        pool,
        &PageInitHooks::standard(),
        CreatePage {
            parent_id,
            title: slug.to_string(),
            slug: slug.to_string(),
            page_type: page_type.to_string(),
            live: Some(true),
            language_id: None,
            translation_key: None,
        },
    )
    .await
    .unwrap()
}

/// Adds `blog.example.org`, rooted at a second translation index beside the
/// seeded Home page.
async fn blog_site(pool: &PgPool) -> Page {
    let root = PageRepo::find_by_url_path(pool, "/").await.unwrap().unwrap();
    let blog = create_page(pool, root.id, "blog", "translation_index").await;
    SiteRepo::create(pool, "blog.example.org", 80, blog.id, false)
        .await
        .unwrap();
    blog
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hostname_selects_matching_site(pool: PgPool) {
    let blog = blog_site(&pool).await;

    let site = SiteRepo::find_for_hostname(&pool, "blog.example.org")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(site.root_page_id, blog.id);
    assert_eq!(site.root_url_path, "/blog/");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_hostname_falls_back_to_default(pool: PgPool) {
    blog_site(&pool).await;

    let site = SiteRepo::find_for_hostname(&pool, "www.example.org")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(site.hostname, "localhost");
    assert_eq!(site.root_url_path, "/home/");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_path_resolves_to_its_site(pool: PgPool) {
    let blog = blog_site(&pool).await;
    let post = create_page(&pool, blog.id, "first-post", "generic").await;

    let site = SiteRepo::find_for_page_path(&pool, &post.path)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(site.hostname, "blog.example.org");
    assert!(site.contains_path(&post.path));
    assert_eq!(site.url_for(&post.url_path).as_deref(), Some("/first-post/"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_outside_every_site_has_none(pool: PgPool) {
    let root = PageRepo::find_by_url_path(&pool, "/").await.unwrap().unwrap();
    let orphan = create_page(&pool, root.id, "orphan", "generic").await;

    let site = SiteRepo::find_for_page_path(&pool, &orphan.path).await.unwrap();
    assert!(site.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_puts_default_site_first(pool: PgPool) {
    blog_site(&pool).await;

    let hostnames: Vec<String> = SiteRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.hostname)
        .collect();
    assert_eq!(hostnames, vec!["localhost", "blog.example.org"]);
}
