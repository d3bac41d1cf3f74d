
/// Routes `log` records from the tree to the test harness' captured output.
pub(crate) fn init_logging() {
    // Only the first test to get here installs the logger.
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}

mod tests {
    use super::*;
    use crate::Tree;

    #[test]
    fn logging_captures_rotations() {
        init_logging();
        // Installing twice is harmless.
        init_logging();
        assert_eq!(log::max_level(), log::LevelFilter::Trace);

        // Ascending inserts rotate, emitting trace records through the installed logger.
        let tree: Tree<_> = (0..8).collect();
        assert_eq!(tree.height(), 4);
    }
}
