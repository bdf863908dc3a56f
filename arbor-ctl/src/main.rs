use std::{
    env::VarError,
    path::{Path, PathBuf},
};

use anyhow::Context;
use arbor_client::{
    api::{CollapseState, CommentId, CommentOrder, Thread, Time, UserId, Uuid, Viewer},
    CommentNode, CommentTree,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Thread to load, as JSON
    #[structopt(short, long)]
    thread: PathBuf,

    /// One of relevance, votes, newest, posted
    #[structopt(short, long, default_value = "relevance")]
    order: CommentOrder,

    /// Viewing user, defaults to the ARBOR_VIEWER environment variable
    #[structopt(long)]
    viewer: Option<Uuid>,

    /// Viewer's previous visit, comments posted after it are new (RFC 3339)
    #[structopt(long)]
    last_visit: Option<Time>,

    /// Collapse already-read discussion on return
    #[structopt(long)]
    collapse_old: bool,

    /// Apply the state the thread is first shown in before running the command
    #[structopt(long)]
    initial: bool,

    /// Print the resulting states as JSON
    #[structopt(long)]
    json: bool,

    #[structopt(subcommand)]
    cmd: Option<Command>,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Toggle a single comment
    CollapseOne {
        /// Comment id
        id: Uuid,
    },

    /// Expand every comment
    ExpandAll,

    /// Collapse every direct reply to a top-level comment
    CollapseAllTopLevel,

    /// Expand every collapsed comment
    ExpandAllFromCollapsed,

    /// Collapse read discussion and surface new comments
    FocusNew,
}

#[derive(serde::Serialize)]
struct NodeView {
    id: CommentId,
    depth: usize,
    is_new: bool,
    state: CollapseState,
}

fn viewer_id(flag: Option<Uuid>) -> anyhow::Result<Option<UserId>> {
    if let Some(id) = flag {
        return Ok(Some(UserId(id)));
    }
    match std::env::var("ARBOR_VIEWER") {
        Ok(id) => {
            let id = Uuid::try_parse(&id).context("parsing ARBOR_VIEWER as a user id")?;
            Ok(Some(UserId(id)))
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).context("retrieving ARBOR_VIEWER environment variable"),
    }
}

fn load_thread(path: &Path) -> anyhow::Result<Thread> {
    let data =
        std::fs::read(path).with_context(|| format!("reading thread file {:?}", path))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing thread file {:?}", path))
}

fn render_text(node: &CommentNode, out: &mut Vec<String>) {
    let indent = "  ".repeat(node.depth + 1);
    if let Some(removed) = &node.removed_marker {
        out.push(format!("{indent}{removed}"));
        return;
    }
    let marker = if node.is_new { " [new]" } else { "" };
    let text = if node.is_deleted {
        "[deleted]"
    } else if node.is_removed {
        "[removed]"
    } else {
        node.text.lines().next().unwrap_or("")
    };
    let glyph = node.state.toggle_glyph();
    match node.state {
        CollapseState::Expanded => out.push(format!("{indent}{glyph} {}{marker}: {text}", node.id)),
        CollapseState::CollapsedIndividual => {
            out.push(format!("{indent}{glyph} {}{marker} (collapsed)", node.id))
        }
        CollapseState::Collapsed => {
            out.push(format!(
                "{indent}{glyph} {}{marker} ({} replies hidden)",
                node.id, node.num_children
            ));
            return;
        }
    }
    for c in node.children.iter() {
        render_text(c, out);
    }
}

/// Log filter taken from `RUST_LOG`, errors only when it is unset
fn log_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::from_default_env()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let viewer = Viewer {
        user: viewer_id(opt.viewer)?,
        last_visit: opt.last_visit,
        collapse_old_comments: opt.collapse_old,
    };
    let thread = load_thread(&opt.thread)?;
    let mut tree =
        CommentTree::build(thread, viewer, opt.order).context("building comment tree")?;

    if opt.initial {
        tree.apply_initial_collapse();
    }

    match opt.cmd {
        None => (),
        Some(Command::CollapseOne { id }) => {
            tree.collapse_one(&CommentId(id))
                .context("toggling comment")?;
        }
        Some(Command::ExpandAll) => {
            tree.expand_all();
        }
        Some(Command::CollapseAllTopLevel) => {
            tree.collapse_all_top_level();
        }
        Some(Command::ExpandAllFromCollapsed) => {
            tree.expand_all_from_collapsed();
        }
        Some(Command::FocusNew) => {
            tree.collapse_read_highlight_new();
        }
    }

    if opt.json {
        let views = tree
            .iter()
            .map(|n| NodeView {
                id: n.id,
                depth: n.depth,
                is_new: n.is_new,
                state: n.state,
            })
            .collect::<Vec<_>>();
        println!(
            "{}",
            serde_json::to_string_pretty(&views).context("serializing comment states")?
        );
    } else {
        let mut lines = vec![tree.post.text.lines().next().unwrap_or("").to_string()];
        for c in tree.comments.iter() {
            render_text(c, &mut lines);
        }
        for l in lines {
            println!("{l}");
        }
    }

    Ok(())
}
