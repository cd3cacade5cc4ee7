// ABOUTME: Test support utilities.
// ABOUTME: Provides the recording API double and deployment plan builders.

// Each test binary only uses some of these items, so allow dead_code.
#[allow(dead_code)]
pub mod plans;
#[allow(dead_code)]
pub mod recording_api;
