/// Development utilities module
///
/// Mock data providers backed by the fixtures, used by the test suite
/// and by `--mock` mode for demos without network access.
pub mod mock_client;
