//! Backend type aliases and device management
//!
//! Observations are plain CPU tensors, so the NdArray backend is all the
//! environment needs. Agents living on another backend can convert the
//! frame with [`Observation::to_tensor`](super::Observation::to_tensor).

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used for environment observations
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
