//! Build orchestration
//!
//! ```text
//! commands/ → build/cmake.rs  → cmake -S/-B/-G, cmake --build
//!           → build/ctest.rs  → ctest
//!           → build/artifact.rs (locate the produced executable)
//! ```

pub mod artifact;
pub mod cmake;
pub mod ctest;

pub use artifact::ArtifactSearch;
pub use cmake::CMakeConfig;
pub use ctest::CTestConfig;
