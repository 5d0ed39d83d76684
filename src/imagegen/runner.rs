//! Sequential batch over a manifest.
//!
//! Entries are processed strictly in order. An existing destination file is
//! skipped without a request and counts as a success. Failures are recorded
//! and the batch moves on. After each newly generated image the next network
//! request is delayed by the throttle interval; skips and failures do not
//! arm the throttle and nothing waits after the last entry.

use super::client::ImageApi;
use super::manifest::ManifestEntry;
use super::retry::{EntryError, RetryPolicy, Sleeper, generate_with_retry};
use crate::config::ImagesConfig;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;
use tracing::{debug, warn};

/// Progress reported while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageEvent {
    Started {
        total: usize,
    },
    Skipped {
        filename: String,
    },
    Generating {
        filename: String,
    },
    RateLimited {
        filename: String,
        attempt: u32,
        max_retries: u32,
        wait: Duration,
    },
    Throttled {
        wait: Duration,
    },
    Saved {
        filename: String,
        format: Option<String>,
        bytes: usize,
    },
    Failed {
        filename: String,
        error: EntryError,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub policy: RetryPolicy,
    pub throttle: Duration,
}

impl From<&ImagesConfig> for RunOptions {
    fn from(config: &ImagesConfig) -> Self {
        Self {
            policy: RetryPolicy::from(config),
            throttle: config.throttle(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub generated: usize,
    pub skipped: usize,
    pub failed: Vec<(String, EntryError)>,
}

impl RunSummary {
    /// Generated plus skipped.
    pub fn succeeded(&self) -> usize {
        self.generated + self.skipped
    }
}

/// Join a manifest filename onto `out_dir`, refusing anything that could
/// escape it.
fn destination(out_dir: &Path, filename: &str) -> Option<PathBuf> {
    let relative = Path::new(filename);
    let safe = !filename.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    safe.then(|| out_dir.join(relative))
}

fn write_image(path: &Path, bytes: &[u8]) -> Result<(), EntryError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| EntryError::Write(e.to_string()))?;
    }
    fs::write(path, bytes).map_err(|e| EntryError::Write(e.to_string()))
}

fn sniff_format(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format!("{format:?}").to_lowercase())
}

pub fn run(
    manifest: &[ManifestEntry],
    out_dir: &Path,
    api: &impl ImageApi,
    sleeper: &impl Sleeper,
    options: &RunOptions,
    events: Option<Sender<ImageEvent>>,
) -> RunSummary {
    let emit = |event: ImageEvent| {
        if let Some(tx) = &events {
            tx.send(event).ok();
        }
    };

    let mut summary = RunSummary {
        total: manifest.len(),
        ..RunSummary::default()
    };
    let mut throttle_pending = false;
    emit(ImageEvent::Started {
        total: manifest.len(),
    });

    for entry in manifest {
        let filename = entry.filename.clone();
        let Some(path) = destination(out_dir, &entry.filename) else {
            let error = EntryError::Write(format!("refusing path outside output dir: {filename}"));
            emit(ImageEvent::Failed {
                filename: filename.clone(),
                error: error.clone(),
            });
            summary.failed.push((filename, error));
            continue;
        };

        if path.exists() {
            debug!(path = %path.display(), "image exists, skipping");
            summary.skipped += 1;
            emit(ImageEvent::Skipped { filename });
            continue;
        }

        if throttle_pending {
            emit(ImageEvent::Throttled {
                wait: options.throttle,
            });
            sleeper.sleep(options.throttle);
            throttle_pending = false;
        }

        emit(ImageEvent::Generating {
            filename: filename.clone(),
        });
        let result = generate_with_retry(
            &entry.prompt,
            &entry.aspect_ratio,
            api,
            sleeper,
            &options.policy,
            |attempt, wait| {
                emit(ImageEvent::RateLimited {
                    filename: filename.clone(),
                    attempt,
                    max_retries: options.policy.max_retries,
                    wait,
                })
            },
        )
        .and_then(|bytes| write_image(&path, &bytes).map(|()| bytes));

        match result {
            Ok(bytes) => {
                let format = sniff_format(&bytes);
                if format.is_none() {
                    warn!(filename = %filename, "saved payload is not a recognised image format");
                }
                summary.generated += 1;
                throttle_pending = true;
                emit(ImageEvent::Saved {
                    filename,
                    format,
                    bytes: bytes.len(),
                });
            }
            Err(error) => {
                warn!(filename = %filename, %error, "image generation failed");
                emit(ImageEvent::Failed {
                    filename: filename.clone(),
                    error: error.clone(),
                });
                summary.failed.push((filename, error));
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagegen::retry::test_support::*;
    use std::sync::mpsc;
    use tempfile::TempDir;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn entry(filename: &str) -> ManifestEntry {
        ManifestEntry {
            filename: filename.to_string(),
            prompt: format!("prompt for {filename}"),
            aspect_ratio: "1:1".to_string(),
        }
    }

    fn options() -> RunOptions {
        RunOptions::from(&ImagesConfig::default())
    }

    #[test]
    fn existing_file_is_skipped_without_request() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("hero")).unwrap();
        fs::write(tmp.path().join("hero/a.jpg"), b"already here").unwrap();
        let api = ScriptedApi::default();
        let sleeper = RecordingSleeper::default();

        let summary = run(&[entry("hero/a.jpg")], tmp.path(), &api, &sleeper, &options(), None);

        assert_eq!(api.call_count(), 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.succeeded(), 1);
        assert!(summary.failed.is_empty());
        assert!(sleeper.sleeps.borrow().is_empty());
        assert_eq!(fs::read(tmp.path().join("hero/a.jpg")).unwrap(), b"already here");
    }

    #[test]
    fn rate_limited_then_saved() {
        let tmp = TempDir::new().unwrap();
        let api = ScriptedApi::new(vec![status(429, ""), status(429, ""), ok_image(PNG_MAGIC)]);
        let sleeper = RecordingSleeper::default();

        let summary = run(&[entry("team/a.png")], tmp.path(), &api, &sleeper, &options(), None);

        assert_eq!(summary.generated, 1);
        assert_eq!(
            *sleeper.sleeps.borrow(),
            vec![Duration::from_secs(30), Duration::from_secs(60)]
        );
        assert_eq!(fs::read(tmp.path().join("team/a.png")).unwrap(), PNG_MAGIC);
    }

    #[test]
    fn throttle_only_between_generated_images() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("skip.jpg"), b"x").unwrap();
        let api = ScriptedApi::new(vec![
            ok_image(b"one"),
            status(500, "boom"),
            ok_image(b"three"),
        ]);
        let sleeper = RecordingSleeper::default();
        let manifest = [
            entry("one.jpg"),
            entry("skip.jpg"),
            entry("two.jpg"),
            entry("three.jpg"),
        ];

        let summary = run(&manifest, tmp.path(), &api, &sleeper, &options(), None);

        // One throttle before "two.jpg" (after "one.jpg" succeeded). The
        // failure does not arm it and nothing trails the last entry.
        assert_eq!(*sleeper.sleeps.borrow(), vec![Duration::from_secs(15)]);
        assert_eq!(summary.generated, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "two.jpg");
        assert_eq!(summary.succeeded(), 3);
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        let api = ScriptedApi::new(vec![status(403, "forbidden"), ok_image(b"ok")]);
        let sleeper = RecordingSleeper::default();

        let summary = run(
            &[entry("a.jpg"), entry("b.jpg")],
            tmp.path(),
            &api,
            &sleeper,
            &options(),
            None,
        );

        assert_eq!(api.call_count(), 2);
        assert_eq!(summary.generated, 1);
        assert_eq!(
            summary.failed[0].1,
            EntryError::Api {
                status: 403,
                body: "forbidden".into()
            }
        );
        assert!(!tmp.path().join("a.jpg").exists());
        assert!(tmp.path().join("b.jpg").exists());
    }

    #[test]
    fn escaping_paths_are_refused() {
        let tmp = TempDir::new().unwrap();
        let api = ScriptedApi::default();
        let sleeper = RecordingSleeper::default();

        let summary = run(
            &[entry("../evil.jpg"), entry("/etc/evil.jpg")],
            tmp.path(),
            &api,
            &sleeper,
            &options(),
            None,
        );

        assert_eq!(api.call_count(), 0);
        assert_eq!(summary.failed.len(), 2);
    }

    #[test]
    fn events_describe_the_run() {
        let tmp = TempDir::new().unwrap();
        let api = ScriptedApi::new(vec![status(429, ""), ok_image(PNG_MAGIC)]);
        let sleeper = RecordingSleeper::default();
        let (tx, rx) = mpsc::channel();

        run(&[entry("a.png")], tmp.path(), &api, &sleeper, &options(), Some(tx));
        let events: Vec<ImageEvent> = rx.iter().collect();

        assert_eq!(
            events,
            vec![
                ImageEvent::Started { total: 1 },
                ImageEvent::Generating {
                    filename: "a.png".into()
                },
                ImageEvent::RateLimited {
                    filename: "a.png".into(),
                    attempt: 1,
                    max_retries: 3,
                    wait: Duration::from_secs(30),
                },
                ImageEvent::Saved {
                    filename: "a.png".into(),
                    format: Some("png".into()),
                    bytes: PNG_MAGIC.len(),
                },
            ]
        );
    }
}
