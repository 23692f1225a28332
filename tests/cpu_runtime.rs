//! Integration tests for the CPU runtime, tensors and parallelism settings

mod common;

use common::{create_cpu_client, ramp};
use evalkern::prelude::*;
use evalkern::tensor::Storage;
use half::f16;

#[test]
fn test_runtime_identity() {
    let (client, device) = create_cpu_client();
    assert_eq!(CpuRuntime::name(), "cpu");
    assert!(client.device().is_same(&device));
    assert!(CpuRuntime::default_device().is_same(&device));
    assert!(client.synchronize().is_ok());
}

#[test]
fn test_tensor_construction() {
    let device = CpuDevice::new();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[1, 2, 3], &device);
    assert_eq!(t.shape(), &[1, 2, 3]);
    assert_eq!(t.ndim(), 3);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.dtype(), DType::F32);

    let filled = Tensor::<CpuRuntime>::full_scalar(&[3], DType::F16, 1.5, &device);
    assert_eq!(filled.to_vec::<f16>(), vec![f16::from_f32(1.5); 3]);

    let empty = Tensor::<CpuRuntime>::zeros(&[0, 4], DType::F32, &device);
    assert_eq!(empty.numel(), 0);
    assert!(empty.to_vec::<f32>().is_empty());

    assert!(matches!(
        Tensor::<CpuRuntime>::try_from_slice(&[1.0f32, 2.0], &[3], &device),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_reshape_shares_storage() {
    let device = CpuDevice::new();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
    let flat = t.reshape(&[4]).unwrap();
    assert_eq!(flat.ptr(), t.ptr());
    assert!(flat.aliases(&t));
    assert!(t.reshape(&[3]).is_err());

    let other = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
    assert!(!other.aliases(&t));
}

#[test]
fn test_constructors_initialize_reused_memory() {
    let device = CpuDevice::new();
    // Freed buffers of the same size are likely handed straight back
    for _ in 0..4 {
        drop(Tensor::<CpuRuntime>::full_scalar(&[64], DType::F32, 7.0, &device));
        let fresh = Tensor::<CpuRuntime>::zeros(&[64], DType::F32, &device);
        assert!(fresh.to_vec::<f32>().iter().all(|&v| v == 0.0));
        assert!(fresh.storage().is_owned());
    }
    let copied = Tensor::<CpuRuntime>::from_slice(&ramp(64), &[64], &device);
    assert_eq!(copied.to_vec::<f32>(), ramp(64));
}

#[test]
fn test_to_vec_checks_dtype() {
    let device = CpuDevice::new();
    let t = Tensor::<CpuRuntime>::zeros(&[2], DType::F32, &device);
    assert!(matches!(
        t.try_to_vec::<f16>(),
        Err(Error::DTypeMismatch { .. })
    ));
}

#[test]
fn test_borrowed_storage_wraps_caller_memory() {
    let device = CpuDevice::new();
    let (client, _) = create_cpu_client();
    let mut host = vec![1.0f32, -1.0, 2.0, -2.0];

    let storage =
        unsafe { Storage::<CpuRuntime>::from_ptr(host.as_mut_ptr() as u64, 4, DType::F32, &device) };
    assert!(!storage.is_owned());
    let mut buf = Tensor::from_parts(storage, &[4]).unwrap();
    let bias = Tensor::<CpuRuntime>::from_slice(&[1.0f32; 4], &[4], &device);
    client.add_tensor_inplace(&mut buf, &bias).unwrap();
    drop(buf);

    assert_eq!(host, vec![2.0, 0.0, 3.0, -1.0]);
}

#[test]
fn test_thread_count_does_not_change_results() {
    let device = CpuDevice::new();
    let (n, c, xy) = (4, 32, 361);
    let data = ramp(n * c * xy);
    let input = Tensor::<CpuRuntime>::from_slice(&data, &[n, xy, c], &device);

    let mut results = Vec::new();
    for config in [
        ParallelismConfig::new(Some(1), None),
        ParallelismConfig::new(Some(4), Some(1)),
        ParallelismConfig::default(),
    ] {
        let client = CpuClient::new(device).with_parallelism(config);
        let mut pooled = Tensor::<CpuRuntime>::zeros(&[n, 3 * c], DType::F32, &device);
        client
            .global_pool(&input, &mut pooled, DataFormat::Nhwc, None)
            .unwrap();
        let mut scaled = Tensor::<CpuRuntime>::zeros(&[n, xy, c], DType::F32, &device);
        let ones = Tensor::<CpuRuntime>::full_scalar(&[c], DType::F32, 1.0, &device);
        let zeros = Tensor::<CpuRuntime>::zeros(&[c], DType::F32, &device);
        client
            .apply_c_scale_bias(&input, &mut scaled, &ones, &zeros, None, DataFormat::Nhwc, true)
            .unwrap();
        results.push((pooled.to_vec::<f32>(), scaled.to_vec::<f32>()));
    }

    for (pooled, scaled) in &results[1..] {
        assert_eq!(pooled, &results[0].0);
        assert_eq!(scaled, &results[0].1);
    }
}
