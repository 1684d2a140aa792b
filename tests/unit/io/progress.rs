//! Tests for progress tracking state and the run observer adapter

#[cfg(test)]
mod tests {
    use overtile::algorithm::executor::RunObserver;
    use overtile::algorithm::wave::WaveState;
    use overtile::io::progress::{FileProgress, ProgressManager};
    use std::path::Path;

    // Tests manager initialization records the file count
    // Verified by ignoring the count argument
    #[test]
    fn test_initialize() {
        let mut manager = ProgressManager::default();
        manager.initialize(12);
        assert_eq!(manager.file_count(), 12);
        manager.finish();
    }

    // Tests start, attempt and completion bookkeeping
    // Verified by leaving collapsed counts untouched on retry
    #[test]
    fn test_file_lifecycle() {
        let mut manager = ProgressManager::new();
        manager.initialize(2);
        manager.start_file(1, Path::new("dir/sample.png"), 100);
        assert_eq!(manager.file_progress(1), Some((0, 100)));
        assert_eq!(manager.file_attempt(1), Some(1));

        manager.update_collapsed(1, 40);
        assert_eq!(manager.file_progress(1), Some((40, 100)));

        manager.start_attempt(1, 2);
        assert_eq!(manager.file_progress(1), Some((0, 100)));
        assert_eq!(manager.file_attempt(1), Some(2));

        manager.update_collapsed(1, 500);
        assert_eq!(manager.file_progress(1), Some((100, 100)));

        manager.complete_file(1, true);
        assert_eq!(manager.file_progress(1), Some((100, 100)));
        assert_eq!(manager.file_progress(0), Some((0, 0)));
        assert_eq!(manager.file_progress(5), None);
        manager.finish();
    }

    // Tests the observer forwards the wave's collapsed cell count
    // Verified by forwarding the iteration number instead
    #[test]
    fn test_file_progress_observer() {
        let mut manager = ProgressManager::new();
        manager.initialize(1);
        manager.start_file(0, Path::new("a.png"), 4);

        let mut wave = WaveState::new(4, &[1, 1]);
        wave.ban(0, 0);
        wave.ban(3, 1);

        {
            let mut observer = FileProgress::new(&mut manager, 0);
            observer.on_iteration(17, &wave);
        }
        assert_eq!(manager.file_progress(0), Some((2, 4)));
        manager.finish();
    }
}
