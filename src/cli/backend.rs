#[cfg(not(feature = "tch"))]
use burn::backend::{ndarray::NdArrayDevice, NdArray};

#[cfg(feature = "tch")]
use burn::backend::{libtorch::LibTorchDevice, LibTorch};

/// The backend used by the command line tools
#[cfg(not(feature = "tch"))]
pub type Backend = NdArray;

/// The backend used by the command line tools
#[cfg(feature = "tch")]
pub type Backend = LibTorch;

/// The device used by the command line tools
#[cfg(not(feature = "tch"))]
pub fn device() -> NdArrayDevice {
    NdArrayDevice::Cpu
}

/// The device used by the command line tools
#[cfg(feature = "tch")]
pub fn device() -> LibTorchDevice {
    LibTorchDevice::Cuda(0)
}
