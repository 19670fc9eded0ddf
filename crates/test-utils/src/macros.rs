/// A macro to generate a new integration test case running in a fresh [`TempProject`].
///
/// [`TempProject`]: crate::TempProject
///
/// # Example
///
/// ```no_run
/// use chronicles_test_utils::*;
/// chroniclestest!(writes_ledger, |prj| {
///     prj.add_script("Deploy.s.sol");
///     assert!(prj.config().script_path("Deploy.s.sol").exists());
/// });
/// ```
#[macro_export]
macro_rules! chroniclestest {
    ($(#[$attr:meta])* $test:ident, |$prj:ident| $e:expr) => {
        #[test]
        $(#[$attr])*
        fn $test() {
            $crate::init_tracing();
            let $prj = $crate::TempProject::new(stringify!($test));
            $e
        }
    };
}
