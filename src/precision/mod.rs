//! Precision - 权重文件精度转换
//!
//! 离线把 safetensors 权重中的浮点张量转换为半精度（F16），
//! 写出新文件并计算 SHA-256，可选地与固定摘要比对。
//! 音色文件加载也复用这里的张量解码。

use std::collections::HashMap;
use std::path::Path;

use half::{bf16, f16};
use safetensors::tensor::TensorView;
use safetensors::{serialize, Dtype, SafeTensorError, SafeTensors};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// 精度转换错误
#[derive(Debug, Error)]
pub enum PrecisionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid safetensors data: {0}")]
    Format(#[from] SafeTensorError),

    #[error("Unsupported dtype: {0:?}")]
    UnsupportedDtype(Dtype),

    #[error("Tensor data length {len} is not a multiple of {width}")]
    Misaligned { len: usize, width: usize },

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// 转换报告
#[derive(Debug, Clone)]
pub struct HalveReport {
    /// 转换为 F16 的张量数
    pub converted: usize,
    /// 原样复制的张量数（非浮点或已是 F16）
    pub copied: usize,
    /// 输出文件大小（字节）
    pub output_bytes: usize,
    /// 输出文件 SHA-256（小写十六进制）
    pub sha256: String,
}

/// 把浮点张量字节解码为 f32
pub fn tensor_to_f32(dtype: Dtype, data: &[u8]) -> Result<Vec<f32>, PrecisionError> {
    let width = match dtype {
        Dtype::F16 | Dtype::BF16 => 2,
        Dtype::F32 => 4,
        Dtype::F64 => 8,
        other => return Err(PrecisionError::UnsupportedDtype(other)),
    };
    if data.len() % width != 0 {
        return Err(PrecisionError::Misaligned {
            len: data.len(),
            width,
        });
    }

    let values = match dtype {
        Dtype::F16 => data
            .chunks_exact(2)
            .map(|c| f16::from_le_bytes([c[0], c[1]]).to_f32())
            .collect(),
        Dtype::BF16 => data
            .chunks_exact(2)
            .map(|c| bf16::from_le_bytes([c[0], c[1]]).to_f32())
            .collect(),
        Dtype::F32 => data
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
        _ => data
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as f32)
            .collect(),
    };

    Ok(values)
}

/// 把浮点张量字节转换为 F16 字节；非浮点或已是 F16 返回 None
fn halve_tensor(dtype: Dtype, data: &[u8]) -> Result<Option<Vec<u8>>, PrecisionError> {
    let halved = match dtype {
        Dtype::F32 | Dtype::BF16 => tensor_to_f32(dtype, data)?
            .into_iter()
            .flat_map(|v| f16::from_f32(v).to_le_bytes())
            .collect(),
        Dtype::F64 => {
            if data.len() % 8 != 0 {
                return Err(PrecisionError::Misaligned {
                    len: data.len(),
                    width: 8,
                });
            }
            data.chunks_exact(8)
                .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                .flat_map(|v| f16::from_f64(v).to_le_bytes())
                .collect()
        }
        _ => return Ok(None),
    };
    Ok(Some(halved))
}

/// 计算字节序列的 SHA-256（小写十六进制）
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// 半精度转换
///
/// 读取 `input`，浮点张量转为 F16，其余原样保留，写入 `output`
pub fn halve_weights(input: &Path, output: &Path) -> Result<HalveReport, PrecisionError> {
    let buffer = std::fs::read(input)?;
    let tensors = SafeTensors::deserialize(&buffer)?;

    let mut converted = 0;
    let mut copied = 0;
    let mut owned: Vec<(String, Dtype, Vec<usize>, Vec<u8>)> = Vec::new();

    for (name, view) in tensors.tensors() {
        match halve_tensor(view.dtype(), view.data())? {
            Some(data) => {
                converted += 1;
                owned.push((name, Dtype::F16, view.shape().to_vec(), data));
            }
            None => {
                copied += 1;
                owned.push((name, view.dtype(), view.shape().to_vec(), view.data().to_vec()));
            }
        }
    }

    let mut views: HashMap<String, TensorView<'_>> = HashMap::new();
    for (name, dtype, shape, data) in &owned {
        views.insert(name.clone(), TensorView::new(*dtype, shape.clone(), data)?);
    }

    let bytes = serialize(&views, None)?;
    std::fs::write(output, &bytes)?;

    let report = HalveReport {
        converted,
        copied,
        output_bytes: bytes.len(),
        sha256: sha256_hex(&bytes),
    };

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        converted = report.converted,
        copied = report.copied,
        output_bytes = report.output_bytes,
        sha256 = %report.sha256,
        "Weights converted to half precision"
    );

    Ok(report)
}

/// 校验输出摘要（忽略大小写）
pub fn verify_checksum(report: &HalveReport, expected: &str) -> Result<(), PrecisionError> {
    if report.sha256.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(PrecisionError::ChecksumMismatch {
            expected: expected.trim().to_lowercase(),
            actual: report.sha256.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_fixture(path: &Path) {
        let weights: Vec<u8> = [0.5_f32, -1.25, 3.0, 0.1]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let ids: Vec<u8> = [7_i64, -2].iter().flat_map(|v| v.to_le_bytes()).collect();

        let mut views: HashMap<String, TensorView<'_>> = HashMap::new();
        views.insert(
            "decoder.weight".to_string(),
            TensorView::new(Dtype::F32, vec![2, 2], &weights).unwrap(),
        );
        views.insert(
            "decoder.ids".to_string(),
            TensorView::new(Dtype::I64, vec![2], &ids).unwrap(),
        );
        std::fs::write(path, serialize(&views, None).unwrap()).unwrap();
    }

    #[test]
    fn test_tensor_to_f32_decodes_float_dtypes() {
        let f32_bytes: Vec<u8> = [1.5_f32, -2.0].iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(tensor_to_f32(Dtype::F32, &f32_bytes).unwrap(), vec![1.5, -2.0]);

        let f16_bytes: Vec<u8> = [f16::from_f32(0.25), f16::from_f32(-4.0)]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        assert_eq!(tensor_to_f32(Dtype::F16, &f16_bytes).unwrap(), vec![0.25, -4.0]);

        let bf16_bytes: Vec<u8> = bf16::from_f32(8.0).to_le_bytes().to_vec();
        assert_eq!(tensor_to_f32(Dtype::BF16, &bf16_bytes).unwrap(), vec![8.0]);
    }

    #[test]
    fn test_tensor_to_f32_rejects_bad_input() {
        assert!(matches!(
            tensor_to_f32(Dtype::I64, &[0; 8]),
            Err(PrecisionError::UnsupportedDtype(Dtype::I64))
        ));
        assert!(matches!(
            tensor_to_f32(Dtype::F32, &[0; 6]),
            Err(PrecisionError::Misaligned { len: 6, width: 4 })
        ));
    }

    #[test]
    fn test_halve_weights_converts_floats_only() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("model.safetensors");
        let output = dir.path().join("model-half.safetensors");
        write_fixture(&input);

        let report = halve_weights(&input, &output).unwrap();
        assert_eq!(report.converted, 1);
        assert_eq!(report.copied, 1);

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(report.output_bytes, bytes.len());
        assert_eq!(report.sha256, sha256_hex(&bytes));

        let tensors = SafeTensors::deserialize(&bytes).unwrap();
        let weight = tensors.tensor("decoder.weight").unwrap();
        assert_eq!(weight.dtype(), Dtype::F16);
        assert_eq!(weight.shape(), &[2, 2]);
        let values = tensor_to_f32(weight.dtype(), weight.data()).unwrap();
        for (value, expected) in values.iter().zip([0.5_f32, -1.25, 3.0, 0.1]) {
            assert!((value - expected).abs() < 1e-3);
        }

        let ids = tensors.tensor("decoder.ids").unwrap();
        assert_eq!(ids.dtype(), Dtype::I64);
        assert_eq!(ids.data().len(), 16);
    }

    #[test]
    fn test_halve_is_reproducible_and_verifiable() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("model.safetensors");
        write_fixture(&input);

        let first = halve_weights(&input, &dir.path().join("a.safetensors")).unwrap();
        let second = halve_weights(&input, &dir.path().join("b.safetensors")).unwrap();
        assert_eq!(first.sha256, second.sha256);

        assert!(verify_checksum(&first, &second.sha256.to_uppercase()).is_ok());
        assert!(matches!(
            verify_checksum(&first, "00"),
            Err(PrecisionError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_halve_missing_input() {
        let dir = tempdir().unwrap();
        let result = halve_weights(
            &dir.path().join("missing.safetensors"),
            &dir.path().join("out.safetensors"),
        );
        assert!(matches!(result, Err(PrecisionError::Io(_))));
    }
}
