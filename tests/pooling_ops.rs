//! Integration tests for spatial pooling

mod common;

use common::{DTYPES, assert_allclose_f32, create_cpu_client, ramp, tensor_from_f32, to_f32_vec};
use evalkern::prelude::*;
use evalkern::tensor::Storage;

/// n=1, c=2, xy=4 board used by the worked example
fn scenario(device: &CpuDevice) -> Tensor<CpuRuntime> {
    Tensor::<CpuRuntime>::from_slice(
        &[1.0f32, -2.0, 3.0, -4.0, 5.0, 6.0, -7.0, 8.0],
        &[1, 2, 4],
        device,
    )
}

#[test]
fn test_pool_scenario() {
    let (client, device) = create_cpu_client();
    let input = scenario(&device);

    let mut sum = Tensor::<CpuRuntime>::zeros(&[1, 2], DType::F32, &device);
    client
        .pool_rows_sum(&input, &mut sum, DataFormat::Nchw, 1.0)
        .unwrap();
    assert_eq!(sum.to_vec::<f32>(), vec![-2.0, 12.0]);

    let mut max = Tensor::<CpuRuntime>::zeros(&[1, 2], DType::F32, &device);
    client
        .pool_rows_max_positive(&input, &mut max, DataFormat::Nchw)
        .unwrap();
    assert_eq!(max.to_vec::<f32>(), vec![3.0, 8.0]);

    let mut fused = Tensor::<CpuRuntime>::zeros(&[1, 4], DType::F32, &device);
    client
        .pool_rows_sum_and_max_positive(&input, &mut fused, DataFormat::Nchw, 1.0)
        .unwrap();
    assert_eq!(fused.to_vec::<f32>(), vec![-2.0, 12.0, 3.0, 8.0]);
}

#[test]
fn test_pool_scale_sum() {
    let (client, device) = create_cpu_client();
    let input = scenario(&device);
    let mut sum = Tensor::<CpuRuntime>::zeros(&[1, 2], DType::F32, &device);
    client
        .pool_rows_sum(&input, &mut sum, DataFormat::Nchw, 0.25)
        .unwrap();
    assert_eq!(sum.to_vec::<f32>(), vec![-0.5, 3.0]);
}

#[test]
fn test_positive_max_floor_is_zero() {
    let (client, device) = create_cpu_client();
    let input =
        Tensor::<CpuRuntime>::from_slice(&[-1.0f32, -2.0, -0.5, -3.0], &[1, 1, 4], &device);
    let mut out = Tensor::<CpuRuntime>::full_scalar(&[1, 1], DType::F32, -9.0, &device);
    client
        .pool_rows_max_positive(&input, &mut out, DataFormat::Nchw)
        .unwrap();
    assert_eq!(out.to_vec::<f32>(), vec![0.0]);
}

#[test]
fn test_nhwc_matches_nchw() {
    let (client, device) = create_cpu_client();
    let (n, c, h, w) = (2, 3, 4, 5);
    let data = ramp(n * c * h * w);
    let nchw = Tensor::<CpuRuntime>::from_slice(&data, &[n, c, h, w], &device);
    let mut nhwc = Tensor::<CpuRuntime>::zeros(&[n, h, w, c], DType::F32, &device);
    client
        .convert_format(&nchw, &mut nhwc, DataFormat::Nchw)
        .unwrap();

    let mut a = Tensor::<CpuRuntime>::zeros(&[n, 3 * c], DType::F32, &device);
    let mut b = Tensor::<CpuRuntime>::zeros(&[n, 3 * c], DType::F32, &device);
    client
        .global_pool(&nchw, &mut a, DataFormat::Nchw, None)
        .unwrap();
    client
        .global_pool(&nhwc, &mut b, DataFormat::Nhwc, None)
        .unwrap();
    assert_allclose_f32(&b.to_vec(), &a.to_vec(), 1e-6, 1e-6, "global_pool nhwc vs nchw");
}

#[test]
fn test_fused_matches_standalone() {
    let (client, device) = create_cpu_client();
    for format in [DataFormat::Nchw, DataFormat::Nhwc] {
        let (n, c) = (2, 3);
        let shape = format.shape(n, c, &[3, 3]);
        let input = Tensor::<CpuRuntime>::from_slice(&ramp(n * c * 9), &shape, &device);

        let mut sum = Tensor::<CpuRuntime>::zeros(&[n, c], DType::F32, &device);
        let mut max = Tensor::<CpuRuntime>::zeros(&[n, c], DType::F32, &device);
        let mut fused = Tensor::<CpuRuntime>::zeros(&[n, 2 * c], DType::F32, &device);
        client.pool_rows_sum(&input, &mut sum, format, 0.5).unwrap();
        client.pool_rows_max_positive(&input, &mut max, format).unwrap();
        client
            .pool_rows_sum_and_max_positive(&input, &mut fused, format, 0.5)
            .unwrap();

        let sum = sum.to_vec::<f32>();
        let max = max.to_vec::<f32>();
        let mut expected = Vec::new();
        for b in 0..n {
            expected.extend_from_slice(&sum[b * c..(b + 1) * c]);
            expected.extend_from_slice(&max[b * c..(b + 1) * c]);
        }
        assert_eq!(fused.to_vec::<f32>(), expected, "{}", format);
    }
}

#[test]
fn test_global_pool_blocks() {
    let (client, device) = create_cpu_client();
    let input = scenario(&device);
    let mask_sum = Tensor::<CpuRuntime>::from_slice(&[2.0f32], &[1], &device);

    let mut out = Tensor::<CpuRuntime>::zeros(&[1, 6], DType::F32, &device);
    client
        .global_pool(&input, &mut out, DataFormat::Nchw, Some(&mask_sum))
        .unwrap();
    assert_eq!(out.to_vec::<f32>(), vec![-2.0, 12.0, 3.0, 8.0, -1.0, 6.0]);

    // Without a count the mean divides by the board area
    client
        .global_pool(&input, &mut out, DataFormat::Nchw, None)
        .unwrap();
    assert_eq!(out.to_vec::<f32>(), vec![-2.0, 12.0, 3.0, 8.0, -0.5, 3.0]);
}

#[test]
fn test_value_head_pool_matches_global_pool() {
    let (client, device) = create_cpu_client();
    let (n, c) = (2, 4);
    let input = Tensor::<CpuRuntime>::from_slice(&ramp(n * c * 25), &[n, c, 5, 5], &device);
    let mask_sum = Tensor::<CpuRuntime>::from_slice(&[25.0f32, 16.0], &[n, 1], &device);

    let mut global = Tensor::<CpuRuntime>::zeros(&[n, 3 * c], DType::F32, &device);
    let mut value = Tensor::<CpuRuntime>::zeros(&[n, 3 * c], DType::F32, &device);
    client
        .global_pool(&input, &mut global, DataFormat::Nchw, Some(&mask_sum))
        .unwrap();
    client
        .value_head_pool(&input, &mut value, DataFormat::Nchw, Some(&mask_sum))
        .unwrap();
    assert_eq!(global.to_vec::<f32>(), value.to_vec::<f32>());
}

#[test]
fn test_f16_agrees_with_f32() {
    let (client, device) = create_cpu_client();
    let (n, c) = (2, 3);
    let data = ramp(n * c * 19 * 19);
    let mask_sum = Tensor::<CpuRuntime>::from_slice(&[361.0f32, 300.0], &[n], &device);

    let mut results = Vec::new();
    for dtype in DTYPES {
        let input = tensor_from_f32::<CpuRuntime>(&data, &[n, c, 19, 19], dtype, &device);
        let mut out = Tensor::<CpuRuntime>::zeros(&[n, 3 * c], dtype, &device);
        client
            .global_pool(&input, &mut out, DataFormat::Nchw, Some(&mask_sum))
            .unwrap();
        results.push(to_f32_vec(&out));
    }
    // Sums over 361 values: compare relative to their magnitude
    assert_allclose_f32(&results[1], &results[0], 1e-2, 5e-2, "global_pool f16 vs f32");
}

#[test]
fn test_pool_errors() {
    let (client, device) = create_cpu_client();
    let input = scenario(&device);

    let mut wrong = Tensor::<CpuRuntime>::zeros(&[1, 3], DType::F32, &device);
    assert!(matches!(
        client.pool_rows_sum_and_max_positive(&input, &mut wrong, DataFormat::Nchw, 1.0),
        Err(Error::ShapeMismatch { .. })
    ));

    let mut half_out = Tensor::<CpuRuntime>::zeros(&[1, 2], DType::F16, &device);
    assert!(matches!(
        client.pool_rows_sum(&input, &mut half_out, DataFormat::Nchw, 1.0),
        Err(Error::DTypeMismatch { .. })
    ));

    let mut out = Tensor::<CpuRuntime>::zeros(&[1, 6], DType::F32, &device);
    let bad_count = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
    assert!(matches!(
        client.global_pool(&input, &mut out, DataFormat::Nchw, Some(&bad_count)),
        Err(Error::ShapeMismatch { .. })
    ));

    let flat = Tensor::<CpuRuntime>::zeros(&[8], DType::F32, &device);
    assert!(matches!(
        client.global_pool(&flat, &mut out, DataFormat::Nchw, None),
        Err(Error::RankMismatch { .. })
    ));
}

#[test]
fn test_pool_rejects_output_over_input() {
    let (client, device) = create_cpu_client();
    let input = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[1, 2, 2], &device);

    // Writing plane 0's statistics would clobber values plane 1 still reads
    let mut over_input = input.reshape(&[1, 4]).unwrap();
    assert!(matches!(
        client.pool_rows_sum_and_max_positive(&input, &mut over_input, DataFormat::Nchw, 1.0),
        Err(Error::InvalidArgument { arg: "out", .. })
    ));
    assert_eq!(input.to_vec::<f32>(), vec![1.0, 2.0, 3.0, 4.0]);

    // The mean divisor may not live inside the output either
    let single = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[1, 1, 4], &device);
    let mut blocks = Tensor::<CpuRuntime>::zeros(&[1, 3], DType::F32, &device);
    let count = unsafe { Storage::<CpuRuntime>::from_ptr(blocks.ptr(), 1, DType::F32, &device) };
    let count = Tensor::from_parts(count, &[1]).unwrap();
    assert!(matches!(
        client.global_pool(&single, &mut blocks, DataFormat::Nchw, Some(&count)),
        Err(Error::InvalidArgument { arg: "out", .. })
    ));
}
