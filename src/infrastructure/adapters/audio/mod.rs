//! Audio Adapter - 音频封装

mod wav_encoder;

pub use wav_encoder::encode_wav;
