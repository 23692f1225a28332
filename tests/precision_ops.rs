//! Integration tests for f32 <-> f16 conversion

mod common;

use common::{create_cpu_client, ramp};
use evalkern::prelude::*;
use evalkern::tensor::Storage;
use half::f16;

#[test]
fn test_f32_to_f16_rounding() {
    let (client, device) = create_cpu_client();
    // 1 + 2^-11 sits halfway between two halves and rounds to the even one
    let values = [0.5f32, -2.25, 1.0 + 1.0 / 2048.0, 1.0e5, -1.0e5, 65504.0];
    let input = Tensor::<CpuRuntime>::from_slice(&values, &[6], &device);
    let mut out = Tensor::<CpuRuntime>::zeros(&[6], DType::F16, &device);
    client.convert_precision(&input, &mut out).unwrap();

    let got: Vec<f32> = out.to_vec::<f16>().into_iter().map(f16::to_f32).collect();
    assert_eq!(got[0], 0.5);
    assert_eq!(got[1], -2.25);
    assert_eq!(got[2], 1.0);
    assert_eq!(got[3], f32::INFINITY);
    assert_eq!(got[4], f32::NEG_INFINITY);
    assert_eq!(got[5], 65504.0);
}

#[test]
fn test_f16_to_f32_is_exact() {
    let (client, device) = create_cpu_client();
    let halves: Vec<f16> = [0.0f32, -1.5, 65504.0, 6.1035156e-5, 3.140625]
        .iter()
        .map(|&v| f16::from_f32(v))
        .collect();
    let input = Tensor::<CpuRuntime>::from_slice(&halves, &[5], &device);
    let mut out = Tensor::<CpuRuntime>::zeros(&[5], DType::F32, &device);
    client.convert_precision(&input, &mut out).unwrap();

    let expected: Vec<f32> = halves.iter().map(|h| h.to_f32()).collect();
    assert_eq!(out.to_vec::<f32>(), expected);
}

#[test]
fn test_round_trip_through_f16() {
    let (client, device) = create_cpu_client();
    // Large enough to span several parallel chunks
    let data = ramp(10_000);
    let input = Tensor::<CpuRuntime>::from_slice(&data, &[100, 100], &device);
    let mut half = Tensor::<CpuRuntime>::zeros(&[100, 100], DType::F16, &device);
    let mut back = Tensor::<CpuRuntime>::zeros(&[100, 100], DType::F32, &device);
    client.convert_precision(&input, &mut half).unwrap();
    client.convert_precision(&half, &mut back).unwrap();
    assert_eq!(back.to_vec::<f32>(), data);
}

#[test]
fn test_same_precision_copies() {
    let (client, device) = create_cpu_client();
    let input = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);

    // Shapes may differ as long as the element counts agree
    let mut out = Tensor::<CpuRuntime>::zeros(&[4], DType::F32, &device);
    client.convert_precision(&input, &mut out).unwrap();
    assert_eq!(out.to_vec::<f32>(), vec![1.0, 2.0, 3.0, 4.0]);

    // Same buffer, same dtype: nothing to do
    let mut same = input.clone();
    client.convert_precision(&input, &mut same).unwrap();
    assert_eq!(same.to_vec::<f32>(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_precision_errors() {
    let (client, device) = create_cpu_client();
    let input = Tensor::<CpuRuntime>::zeros(&[8], DType::F32, &device);

    let mut short = Tensor::<CpuRuntime>::zeros(&[7], DType::F16, &device);
    assert!(matches!(
        client.convert_precision(&input, &mut short),
        Err(Error::ShapeMismatch { .. })
    ));

    // An f16 view over the first half of the f32 buffer
    let storage = unsafe { Storage::<CpuRuntime>::from_ptr(input.ptr(), 8, DType::F16, &device) };
    let mut overlap = Tensor::from_parts(storage, &[8]).unwrap();
    assert!(matches!(
        client.convert_precision(&input, &mut overlap),
        Err(Error::InvalidArgument { arg: "out", .. })
    ));
}
