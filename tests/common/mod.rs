//! Common test utilities
#![allow(dead_code)]

use evalkern::dtype::DType;
use evalkern::runtime::Runtime;
use evalkern::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
#[cfg(feature = "cuda")]
use evalkern::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};
use evalkern::tensor::Tensor;
use half::f16;

/// Route `log` output through the test harness (`RUST_LOG=debug` to see it)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    init_logging();
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Create a CUDA client and device, returning None if CUDA is unavailable
#[cfg(feature = "cuda")]
pub fn create_cuda_client() -> Option<(CudaClient, CudaDevice)> {
    init_logging();
    if !evalkern::runtime::cuda::is_cuda_available() {
        return None;
    }
    let device = CudaDevice::new(0);
    let client = CudaRuntime::default_client(&device);
    Some((client, device))
}

/// Assert two f32 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Build a tensor of `dtype` from f32 values
pub fn tensor_from_f32<R: Runtime>(
    data: &[f32],
    shape: &[usize],
    dtype: DType,
    device: &R::Device,
) -> Tensor<R> {
    match dtype {
        DType::F32 => Tensor::from_slice(data, shape, device),
        DType::F16 => {
            let halves: Vec<f16> = data.iter().map(|&v| f16::from_f32(v)).collect();
            Tensor::from_slice(&halves, shape, device)
        }
    }
}

/// Read a tensor of either precision back as f32
pub fn to_f32_vec<R: Runtime>(t: &Tensor<R>) -> Vec<f32> {
    match t.dtype() {
        DType::F32 => t.to_vec::<f32>(),
        DType::F16 => t.to_vec::<f16>().into_iter().map(f16::to_f32).collect(),
    }
}

/// Deterministic test data in [-1, 1]
///
/// Every value is a multiple of 1/8, so it is exact in f16 and small sums of
/// it are exact in f32 regardless of summation order.
pub fn ramp(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| ((i * 37 + 11) % 17) as f32 / 8.0 - 1.0)
        .collect()
}

/// Both supported precisions
pub const DTYPES: [DType; 2] = [DType::F32, DType::F16];

/// Tolerance for comparing results computed in `dtype`
pub fn tolerance(dtype: DType) -> (f32, f32) {
    match dtype {
        DType::F32 => (1e-6, 1e-6),
        DType::F16 => (1e-2, 1e-2),
    }
}
