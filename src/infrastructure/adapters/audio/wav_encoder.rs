//! WAV Encoder - 把合成波形封装为 WAV
//!
//! 输出单声道 16-bit PCM（RIFF/WAVE），样本先裁剪到 [-1, 1]

/// RIFF 头 + fmt chunk + data chunk 头的长度
const HEADER_LEN: usize = 44;
const BITS_PER_SAMPLE: u16 = 16;
const NUM_CHANNELS: u16 = 1;
/// PCM 格式标识
const FORMAT_PCM: u16 = 1;

/// 编码为 WAV 字节
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let block_align = NUM_CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = (samples.len() * block_align as usize) as u32;

    let mut out = Vec::with_capacity(HEADER_LEN + data_size as usize);

    // RIFF 头
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for sample in samples {
        let clamped = if sample.is_nan() { 0.0 } else { sample.clamp(-1.0, 1.0) };
        let value = (clamped * i16::MAX as f32) as i16;
        out.extend_from_slice(&value.to_le_bytes());
    }

    out
}
