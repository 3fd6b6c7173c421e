//! Foreign Function Interface (FFI) for the host plugin
//!
//! Exposes the kernels under the names the host's managed code imports:
//!
//! | Export                            | Purpose                              |
//! |-----------------------------------|--------------------------------------|
//! | `InitializeNativePlugin`          | Probe CPU, select kernels, return level |
//! | `ExecuteCullingJob`               | Distance culling for `[begin, end)`  |
//! | `ExecuteNametagJob`               | Nametag projection for `[begin, end)`|
//! | `everest_native_capability_level` | Active level without probing         |
//!
//! # Usage from C# (Unity)
//!
//! ```csharp
//! [DllImport("everest_native")] static extern int InitializeNativePlugin();
//! [DllImport("everest_native")] static extern unsafe void ExecuteCullingJob(void* data, int begin, int end);
//! [DllImport("everest_native")] static extern unsafe void ExecuteNametagJob(void* data, int begin, int end);
//!
//! // once at startup
//! var level = InitializeNativePlugin();
//!
//! // per frame, from an IJobParallelForBatch
//! ExecuteCullingJob(jobDataPtr, startIndex, startIndex + count);
//! ```
//!
//! The job structs in [`types`] must match the host's `StructLayout`
//! definitions field for field.

pub mod api;
pub mod types;

pub use api::*;
pub use types::*;
