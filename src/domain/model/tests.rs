// Unit tests for domain models

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use super::*;

/// Probe that answers a fixed duration and counts its invocations
struct CountingProbe {
    calls: AtomicUsize,
    answer: Option<Duration>,
}

impl CountingProbe {
    fn new(answer: Option<Duration>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answer,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbePort for CountingProbe {
    async fn probe_duration(&self, path: &Path) -> ChapcatResult<Duration> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .ok_or_else(|| ChapcatError::probe(path, "probe exited with status 1"))
    }
}

fn touch(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"not really a video").unwrap();
    path
}

#[test]
fn test_media_file_path_decomposition() {
    let dir = TempDir::new().unwrap();
    let path = touch(&dir, "holiday.part1.mp4");

    let file = MediaFile::open(&path).unwrap();
    assert!(file.filename().is_absolute());
    assert_eq!(file.basename(), "holiday.part1");
    assert_eq!(file.extension(), ".mp4");
    assert_eq!(
        format!("{}{}", file.basename(), file.extension()),
        "holiday.part1.mp4"
    );
    assert_eq!(file.directory(), dir.path().canonicalize().unwrap());
}

#[test]
fn test_media_file_without_extension() {
    let dir = TempDir::new().unwrap();
    let path = touch(&dir, "README");

    let file = MediaFile::open(&path).unwrap();
    assert_eq!(file.basename(), "README");
    assert_eq!(file.extension(), "");
}

#[test]
fn test_media_file_resolves_relative_components() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "a.mp4");
    fs::create_dir(dir.path().join("sub")).unwrap();

    let file = MediaFile::open(dir.path().join("sub").join("..").join("a.mp4")).unwrap();
    assert_eq!(
        file.filename(),
        dir.path().canonicalize().unwrap().join("a.mp4")
    );
}

#[test]
fn test_media_file_missing_path_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let err = MediaFile::open(dir.path().join("missing.mp4")).unwrap_err();
    assert!(matches!(err, ChapcatError::InvalidInput { .. }));
}

#[test]
fn test_media_file_directory_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let err = MediaFile::open(dir.path()).unwrap_err();
    assert!(matches!(err, ChapcatError::InvalidInput { .. }));
}

#[cfg(unix)]
#[test]
fn test_media_file_rejects_names_the_concat_list_cannot_hold() {
    let dir = TempDir::new().unwrap();
    let path = touch(&dir, "line\nbreak.mp4");
    let err = MediaFile::open(&path).unwrap_err();
    assert!(matches!(err, ChapcatError::InvalidInput { .. }));
}

#[cfg(target_os = "linux")]
#[test]
fn test_media_file_rejects_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(OsStr::from_bytes(b"bad\xffname.mp4"));
    fs::write(&path, b"x").unwrap();
    let err = MediaFile::open(&path).unwrap_err();
    assert!(matches!(err, ChapcatError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_duration_is_probed_once() {
    let dir = TempDir::new().unwrap();
    let file = MediaFile::open(touch(&dir, "a.mp4")).unwrap();
    let probe = CountingProbe::new(Some(Duration::from_millis(10_500)));

    assert_eq!(file.cached_duration(), None);
    assert_eq!(file.duration(&probe).await.unwrap(), Duration::from_millis(10_500));
    assert_eq!(file.duration(&probe).await.unwrap(), Duration::from_millis(10_500));
    assert_eq!(probe.calls(), 1);
    assert_eq!(file.cached_duration(), Some(Duration::from_millis(10_500)));
}

#[tokio::test]
async fn test_clones_share_the_duration_cache() {
    let dir = TempDir::new().unwrap();
    let file = MediaFile::open(touch(&dir, "a.mp4")).unwrap();
    let copy = file.clone();
    let probe = CountingProbe::new(Some(Duration::from_secs(3)));

    file.duration(&probe).await.unwrap();
    copy.duration(&probe).await.unwrap();
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn test_failed_probe_is_not_cached() {
    let dir = TempDir::new().unwrap();
    let file = MediaFile::open(touch(&dir, "a.mp4")).unwrap();
    let probe = CountingProbe::new(None);

    assert!(matches!(
        file.duration(&probe).await,
        Err(ChapcatError::Probe { .. })
    ));
    assert!(file.duration(&probe).await.is_err());
    assert_eq!(probe.calls(), 2);
    assert_eq!(file.cached_duration(), None);
}

#[test]
fn test_timebase_ticks() {
    let ms = ChapterTimebase::MILLISECONDS;
    assert_eq!(ms.to_ticks(Duration::from_millis(10_500)), 10_500);
    assert_eq!(ms.to_ticks(Duration::from_micros(35_750_999)), 35_750);

    let ntsc = ChapterTimebase::new(1001, 30000).unwrap();
    assert_eq!(ntsc.to_ticks(Duration::from_secs(1001)), 30000);
}

#[test]
fn test_timebase_rejects_zero() {
    assert!(ChapterTimebase::new(1, 0).is_err());
    assert!(ChapterTimebase::new(0, 1000).is_err());
}

#[test]
fn test_chapter_display() {
    let chapter = Chapter {
        index: 1,
        title: "Intro".to_string(),
        start: Duration::from_millis(10_500),
        end: Duration::from_millis(30_500),
    };
    assert_eq!(chapter.length(), Duration::from_secs(20));
    assert_eq!(chapter.to_string(), "  2  00:00:10.500 - 00:00:30.500  Intro");
}

#[test]
fn test_concat_request_builder() {
    let request = ConcatRequest::new(vec![PathBuf::from("a.mp4")], "out.mp4")
        .with_titles(vec!["A".to_string()])
        .with_output_title(Some("Movie".to_string()))
        .with_overwrite(true);

    assert_eq!(request.output, PathBuf::from("out.mp4"));
    assert_eq!(request.titles, vec!["A".to_string()]);
    assert_eq!(request.output_title.as_deref(), Some("Movie"));
    assert!(request.overwrite);
}
