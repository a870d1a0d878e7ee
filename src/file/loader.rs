// src/file/loader.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

use super::map::MapSource;
use crate::map::{MapError, RegionMap};

pub type MapResult = Result<RegionMap, MapError>;

/// Fetches and parses a map on a background thread.
///
/// Dropping the loader clears its liveness flag; a load that finishes
/// afterwards is discarded instead of being delivered.
#[derive(Debug)]
pub struct MapLoader {
    receiver: Receiver<MapResult>,
    alive: Arc<AtomicBool>,
}

impl MapLoader {
    /// `notify` runs on the worker thread after a result is sent, typically
    /// to request a repaint.
    pub fn spawn<F>(source: MapSource, notify: F) -> Result<Self, MapError>
    where
        F: FnOnce() + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let alive = Arc::new(AtomicBool::new(true));

        info!("Loading map from {}", source);
        let worker_alive = Arc::clone(&alive);
        thread::Builder::new()
            .name("map-loader".to_string())
            .spawn(move || run(source, worker_alive, sender, notify))?;

        Ok(Self { receiver, alive })
    }

    /// Non-blocking; `None` while the load is still running.
    pub fn poll(&self) -> Option<MapResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(MapError::LoaderGone)),
        }
    }
}

impl Drop for MapLoader {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}

fn run<F>(source: MapSource, alive: Arc<AtomicBool>, sender: Sender<MapResult>, notify: F)
where
    F: FnOnce(),
{
    let result = source.load();
    if let Err(e) = &result {
        warn!("Map load from {} failed: {}", source, e);
    }

    if !alive.load(Ordering::Acquire) {
        debug!("Discarding map from {}, loader was dropped", source);
        return;
    }
    if sender.send(result).is_ok() {
        notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn test_delivers_bundled_map_and_notifies() {
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        let loader = MapLoader::spawn(MapSource::Bundled, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let map = loader.receiver.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
        assert_eq!(map.shapes.len(), crate::config::REGION_TABLE.len());

        // The worker notifies and hangs up right after sending.
        let mut gone = false;
        for _ in 0..200 {
            if let Some(Err(MapError::LoaderGone)) = loader.poll() {
                gone = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(gone);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_delivered_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = MapLoader::spawn(MapSource::File(dir.path().join("absent.svg")), || {}).unwrap();
        let result = loader.receiver.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(matches!(result, Err(MapError::Io(_))));
    }

    #[test]
    fn test_result_after_teardown_is_discarded() {
        let loader = MapLoader::spawn(MapSource::Bundled, || {}).unwrap();
        let alive = Arc::clone(&loader.alive);
        assert!(alive.load(Ordering::Acquire));

        drop(loader);
        assert!(!alive.load(Ordering::Acquire));

        let (sender, receiver) = mpsc::channel();
        let mut notified = false;
        run(MapSource::Bundled, alive, sender, || notified = true);

        assert!(!notified);
        assert!(receiver.try_recv().is_err());
    }
}
