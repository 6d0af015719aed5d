//! Cross-crate scenarios: engines against the live and inert stores

use futures::StreamExt;
use integration_tests::*;
use photo_common::ToggleStrategy;
use photo_core::{Collection, ImageId, Op, Query};
use photo_service::{
    aggregate_feed, counts_for, group_by_emoji, has_user_reacted, sort_comments, Change,
    CountIndex, FeedView, MutationOutcome, ServiceError, SkipReason,
};

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_scenario_toggle_heart_on_and_off() {
    let app = TestApp::live();
    let (u1, img1) = (user("u1"), image("img1"));
    let mut counts = vec![app.image_snapshot(&img1.id).reactions.len()];

    app.set_time(1000);
    let snapshot = app.image_snapshot(&img1.id).reactions;
    app.reactions()
        .toggle_reaction(&u1, &img1, "❤️", &snapshot)
        .await
        .unwrap();
    let after_first = app.image_snapshot(&img1.id).reactions;
    counts.push(after_first.len());
    assert_eq!(after_first[0].created_at, 1000);

    app.set_time(1050);
    app.reactions()
        .toggle_reaction(&u1, &img1, "❤️", &after_first)
        .await
        .unwrap();
    counts.push(app.image_snapshot(&img1.id).reactions.len());

    assert_eq!(counts, [0, 1, 0]);
}

#[test]
fn test_scenario_comments_sort_ascending() {
    let (u1, img1) = (user("u1"), image("img1"));
    let sorted = sort_comments(vec![
        comment_at("c1", &u1, &img1, "hi", 100),
        comment_at("c2", &u1, &img1, "yo", 50),
    ]);

    let view: Vec<(i64, &str)> = sorted.iter().map(|c| (c.created_at, c.text.as_str())).collect();
    assert_eq!(view, [(50, "yo"), (100, "hi")]);
}

#[tokio::test]
async fn test_scenario_uninitialized_store() {
    let ctx = inert_context();
    let (u1, img1) = (user("u1"), image("img1"));

    for query in [
        Query::everything(),
        Query::for_image(&img1.id),
        Query::new().reactions(photo_core::Filter::all()),
    ] {
        let live = ctx.subscribe(query);
        assert!(live.current().is_empty());
    }

    let outcome = photo_service::ReactionService::new(&ctx)
        .toggle_reaction(&u1, &img1, "❤️", &[])
        .await
        .unwrap();
    assert!(outcome.is_applied());

    ctx.store()
        .transact(vec![Op::delete(Collection::Comments, "c1".into())])
        .await
        .unwrap();
    assert!(ctx.subscribe(Query::everything()).current().is_empty());
    assert!(!ctx.store().is_available());
}

#[tokio::test]
async fn test_scenario_feed_orders_across_kinds() {
    let app = TestApp::live();
    let (u1, u2, img1) = (user("u1"), user("u2"), image("img1"));

    app.set_time(10);
    app.reactions().toggle_reaction(&u1, &img1, "❤️", &[]).await.unwrap();
    app.set_time(20);
    app.reactions().toggle_reaction(&u2, &img1, "🔥", &[]).await.unwrap();
    app.set_time(30);
    app.comments().add_comment(&u1, &img1, "lovely").await.unwrap();

    let feed = FeedView::new(&app.ctx).items();
    let times: Vec<i64> = feed.iter().map(|i| i.created_at).collect();
    assert_eq!(times, [30, 20, 10]);
    assert!(feed[0].is_comment());
    assert!(feed[0].id.starts_with("comment-"));
    assert!(feed[2].id.starts_with("reaction-"));
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn test_uniqueness_without_races() {
    let app = TestApp::live();
    let img = unique_image();
    let users = [unique_user(), unique_user()];
    let script = ["❤️", "👍", "❤️", "❤️", "🔥", "👍", "🔥", "❤️"];

    for (step, emoji) in script.iter().enumerate() {
        let user = &users[step % users.len()];
        app.clock.advance(1);
        let snapshot = app.image_snapshot(&img.id).reactions;
        app.reactions()
            .toggle_reaction(user, &img, emoji, &snapshot)
            .await
            .unwrap();
    }

    let reactions = app.image_snapshot(&img.id).reactions;
    let mut tuples: Vec<(&str, &str)> = reactions
        .iter()
        .map(|r| (r.user_id.as_str(), r.emoji.as_str()))
        .collect();
    let total = tuples.len();
    tuples.sort_unstable();
    tuples.dedup();
    assert_eq!(tuples.len(), total);
}

#[tokio::test]
async fn test_toggle_symmetry() {
    let app = TestApp::live();
    let img = unique_image();
    let other = unique_user();
    app.reactions()
        .toggle_reaction(&other, &img, "👍", &[])
        .await
        .unwrap();
    let before = app.image_snapshot(&img.id).reactions.len();

    let me = unique_user();
    let thread = app.thread(img.clone());
    thread.toggle_reaction(&me, "👍").await.unwrap();
    assert_eq!(thread.reactions().len(), before + 1);
    thread.toggle_reaction(&me, "👍").await.unwrap();

    assert_eq!(app.image_snapshot(&img.id).reactions.len(), before);
}

#[tokio::test]
async fn test_blank_comment_issues_no_mutation() {
    let app = TestApp::live();
    let outcome = app
        .comments()
        .add_comment(&unique_user(), &unique_image(), "   ")
        .await
        .unwrap();

    assert_eq!(outcome, MutationOutcome::Skipped(SkipReason::EmptyComment));
    assert_eq!(app.store.version(), 0);
}

#[test]
fn test_sort_is_idempotent() {
    let (u, img) = (user("u"), image("img"));
    let list = vec![
        comment_at("a", &u, &img, "1", 30),
        comment_at("b", &u, &img, "2", 10),
        comment_at("c", &u, &img, "3", 30),
        comment_at("d", &u, &img, "4", 20),
        comment_at("e", &u, &img, "5", 10),
    ];

    let once = sort_comments(list);
    let twice = sort_comments(once.clone());
    assert_eq!(once, twice);
    let ids: Vec<&str> = once.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["b", "e", "d", "a", "c"]);
}

#[test]
fn test_feed_and_grouping_completeness() {
    let users = [user("u1"), user("u2"), user("u3")];
    let images = [image("img1"), image("img2")];
    let emoji = ["❤️", "👍", "🔥"];

    let mut reactions = Vec::new();
    let mut comments = Vec::new();
    for i in 0..12_usize {
        let (u, img) = (&users[i % 3], &images[i % 2]);
        reactions.push(reaction_at(&format!("r{i}"), u, img, emoji[i % 3], (i * 7 % 5) as i64));
        if i % 4 == 0 {
            comments.push(comment_at(&format!("c{i}"), u, img, "text", i as i64));
        }
    }

    let feed = aggregate_feed(&reactions, &comments);
    assert_eq!(feed.len(), reactions.len() + comments.len());
    assert!(feed.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let groups = group_by_emoji(&reactions);
    let mut regrouped: Vec<&str> = groups
        .values()
        .flatten()
        .map(|r| r.id.as_str())
        .collect();
    let mut original: Vec<&str> = reactions.iter().map(|r| r.id.as_str()).collect();
    regrouped.sort_unstable();
    original.sort_unstable();
    assert_eq!(regrouped, original);
    assert!(groups.iter().all(|(e, rs)| rs.iter().all(|r| r.emoji == *e)));
}

#[test]
fn test_count_index_matches_scan() {
    let (u, img1, img2) = (user("u"), image("img1"), image("img2"));
    let reactions = vec![
        reaction_at("r1", &u, &img1, "❤️", 1),
        reaction_at("r2", &u, &img2, "❤️", 2),
        reaction_at("r3", &u, &img2, "👍", 3),
    ];
    let comments = vec![comment_at("c1", &u, &img1, "hey", 4)];

    let index = CountIndex::build(&reactions, &comments);
    for id in [img1.id.clone(), img2.id.clone(), ImageId::new("nope")] {
        assert_eq!(index.get(&id), counts_for(&id, &reactions, &comments));
    }
}

// ============================================================================
// Races and failures
// ============================================================================

#[tokio::test]
async fn test_stale_snapshot_creates_duplicates() {
    let app = TestApp::live();
    let (u1, img1) = (user("u1"), image("img1"));
    let stale = app.image_snapshot(&img1.id).reactions;

    let service = app.reactions();
    let first = service.toggle_reaction(&u1, &img1, "❤️", &stale);
    let second = service.toggle_reaction(&u1, &img1, "❤️", &stale);
    let (a, b) = tokio::join!(first, second);
    a.unwrap();
    b.unwrap();

    // both toggles saw "absent"
    assert_eq!(app.image_snapshot(&img1.id).reactions.len(), 2);
}

#[tokio::test]
async fn test_stale_snapshot_redundant_deletes_are_harmless() {
    let app = TestApp::live();
    let (u1, img1) = (user("u1"), image("img1"));
    app.reactions().toggle_reaction(&u1, &img1, "❤️", &[]).await.unwrap();
    let stale = app.image_snapshot(&img1.id).reactions;

    let first = app.reactions().toggle_reaction(&u1, &img1, "❤️", &stale).await.unwrap();
    let second = app.reactions().toggle_reaction(&u1, &img1, "❤️", &stale).await.unwrap();

    assert!(matches!(first, MutationOutcome::Applied(Change::Deleted { .. })));
    assert!(matches!(second, MutationOutcome::Applied(Change::Deleted { .. })));
    assert!(app.image_snapshot(&img1.id).reactions.is_empty());
}

#[tokio::test]
async fn test_deterministic_ids_collapse_duplicates() {
    let app = TestApp::with_strategy(ToggleStrategy::Deterministic);
    let other = app.second_client();
    let (u1, img1) = (user("u1"), image("img1"));
    let stale = app.image_snapshot(&img1.id).reactions;

    app.reactions().toggle_reaction(&u1, &img1, "❤️", &stale).await.unwrap();
    photo_service::ReactionService::new(&other)
        .toggle_reaction(&u1, &img1, "❤️", &stale)
        .await
        .unwrap();

    let reactions = app.image_snapshot(&img1.id).reactions;
    assert_eq!(reactions.len(), 1);
    assert!(has_user_reacted("❤️", &img1.id, &u1, &reactions));
}

#[tokio::test]
async fn test_rejected_mutation_is_reported() {
    let app = TestApp::live();
    let (u1, img1) = (user("u1"), image("img1"));
    app.store.reject_next("permission denied");

    let err = app
        .comments()
        .add_comment(&u1, &img1, "will not land")
        .await
        .unwrap_err();

    match err {
        ServiceError::Mutation { collection, reason } => {
            assert_eq!(collection, Collection::Comments);
            assert_eq!(reason, "permission denied");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(app.image_snapshot(&img1.id).comments.is_empty());

    // the rejection is one-shot
    let outcome = app.comments().add_comment(&u1, &img1, "lands").await.unwrap();
    assert!(outcome.is_applied());
}

#[tokio::test]
async fn test_toggle_without_identity_is_skipped() {
    let app = TestApp::live();
    let anonymous = photo_core::User::new("", "nobody", photo_core::UserColor::default());

    let outcome = app
        .reactions()
        .toggle_reaction(&anonymous, &image("img1"), "❤️", &[])
        .await
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Skipped(SkipReason::MissingIdentity));
    assert_eq!(app.store.version(), 0);
}

// ============================================================================
// Live propagation
// ============================================================================

#[tokio::test]
async fn test_second_client_sees_changes_live() {
    let app = TestApp::live();
    let viewer_ctx = app.second_client();
    let img1 = image("img1");
    let mut stream = Box::pin(viewer_ctx.subscribe(Query::for_image(&img1.id)).into_stream());

    let initial = stream.next().await.unwrap();
    assert!(initial.is_empty());

    app.comments().add_comment(&user("u1"), &img1, "hello").await.unwrap();
    let next = stream.next().await.unwrap();
    assert_eq!(next.comments.len(), 1);
    assert_eq!(next.comments[0].text, "hello");
}

#[tokio::test]
async fn test_records_serialize_with_denormalized_fields() {
    let app = TestApp::live();
    let img = image("img7");
    app.set_time(5);
    app.reactions().toggle_reaction(&user("u1"), &img, "⭐", &[]).await.unwrap();

    let reaction = &app.image_snapshot(&img.id).reactions[0];
    let json = serde_json::to_value(reaction).unwrap();
    assert_eq!(json["imageId"], "img7");
    assert_eq!(json["emoji"], "⭐");
    assert_eq!(json["createdAt"], 5);
    assert_eq!(json["imageUrl"], "https://images.test/img7.jpg");
    assert_eq!(json["thumbUrl"], "https://images.test/img7-thumb.jpg");
    assert_eq!(json["imageDescription"], "photo img7");
}
