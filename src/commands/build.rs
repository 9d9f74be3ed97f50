//! Build the static site

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::{Blog, CONFIG_FILE};

/// Quiet period before a burst of file events triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Load all content and generate the site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let loader = ContentLoader::new(blog);
    let posts = loader.load_posts()?;
    let pages = loader.load_pages()?;
    tracing::info!("Loaded {} posts and {} pages", posts.len(), pages.len());

    Generator::new(blog)?.generate(&posts, &pages)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Paths whose changes require a rebuild
fn watched_paths(blog: &Blog) -> Vec<(PathBuf, RecursiveMode)> {
    let mut paths = Vec::new();
    if blog.content_dir.exists() {
        paths.push((blog.content_dir.clone(), RecursiveMode::Recursive));
    }
    let config_path = blog.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        paths.push((config_path, RecursiveMode::NonRecursive));
    }
    paths
}

/// Editor and VCS noise that never affects the output
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Block on file changes, rebuilding after each debounced burst
///
/// `on_rebuild` runs after every successful rebuild. Returns when the
/// watcher channel closes.
pub fn watch<F>(blog: &Blog, mut on_rebuild: F) -> Result<()>
where
    F: FnMut(),
{
    let (tx, rx) = channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for (path, mode) in watched_paths(blog) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|event| is_relevant(&event.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits must be picked up, so reload the whole blog
                let rebuilt = Blog::new(&blog.base_dir).and_then(|fresh| run(&fresh));
                match rebuilt {
                    Ok(()) => on_rebuild(),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("content/posts/hello.md")));
        assert!(!is_relevant(Path::new("content/.git/index")));
        assert!(!is_relevant(Path::new("content/posts/hello.md~")));
        assert!(!is_relevant(Path::new("content/posts/.hello.md.swp")));
    }
}
