use std::collections::HashSet;

use anyhow::Context;
use arbor_api::{Comment, CommentId, CommentLabel, Thread, Time, UserId, Uuid};
use chrono::{Duration, Utc};
use rand::{seq::SliceRandom, Rng};

const NUM_USERS: usize = 8;
const NUM_COMMENTS: usize = 200;

const TOP_LEVEL_PROBABILITY: f64 = 0.2;
const LABEL_PROBABILITY: f64 = 0.05;
const DELETED_PROBABILITY: f64 = 0.03;
const REMOVED_PROBABILITY: f64 = 0.02;

const MAX_VOTES: i64 = 40;
const MAX_REPLY_DELAY_MINUTES: i64 = 240;
const COMMENT_WORD_COUNT: usize = 25;

const LABELS: [CommentLabel; 4] = [
    CommentLabel::Noise,
    CommentLabel::Offtopic,
    CommentLabel::Joke,
    CommentLabel::Exemplary,
];

fn gen_comment(
    rng: &mut impl Rng,
    users: &[UserId],
    parent_id: Option<CommentId>,
    date: Time,
) -> Comment {
    let mut labels = HashSet::new();
    if rng.gen_bool(LABEL_PROBABILITY) {
        labels.extend(LABELS.choose(rng).copied());
    }
    Comment {
        id: CommentId(Uuid::new_v4()),
        parent_id,
        author: users[rng.gen_range(0..users.len())],
        date,
        text: lipsum::lipsum_words(rng.gen_range(1..=COMMENT_WORD_COUNT)),
        num_votes: rng.gen_range(0..=MAX_VOTES),
        labels,
        is_deleted: rng.gen_bool(DELETED_PROBABILITY),
        is_removed: rng.gen_bool(REMOVED_PROBABILITY),
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let users = (0..NUM_USERS)
        .map(|_| UserId(Uuid::new_v4()))
        .collect::<Vec<_>>();

    let start = Utc::now() - Duration::days(7);
    let mut root = gen_comment(&mut rng, &users, None, start);
    root.is_deleted = false;
    root.is_removed = false;

    // every reply is posted after the one it answers
    let mut comments: Vec<Comment> = Vec::with_capacity(NUM_COMMENTS);
    for _ in 0..NUM_COMMENTS {
        let top_level = comments.is_empty() || rng.gen_bool(TOP_LEVEL_PROBABILITY);
        let (parent_id, parent_date) = match top_level {
            true => (None, root.date),
            false => {
                let parent = &comments[rng.gen_range(0..comments.len())];
                (Some(parent.id), parent.date)
            }
        };
        let date = parent_date + Duration::minutes(rng.gen_range(1..=MAX_REPLY_DELAY_MINUTES));
        comments.push(gen_comment(&mut rng, &users, parent_id, date));
    }

    let thread = Thread { root, comments };
    println!(
        "{}",
        serde_json::to_string_pretty(&thread).context("serializing generated thread")?
    );
    Ok(())
}
