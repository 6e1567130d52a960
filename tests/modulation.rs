//! Control and signal sources

/// Returns a ramp in range 0.0..1.0
pub fn ramp_up(block_no: usize, block_count: usize) -> f32 {
    block_no as f32 / block_count as f32
}

/// Returns a sine tone of `frequency` cycles per sample, starting at `start`.
pub fn tone(frequency: f32, start: usize, out: &mut [f32]) {
    for (i, sample) in out.iter_mut().enumerate() {
        let t = (start + i) as f32;
        *sample = (2.0 * core::f32::consts::PI * frequency * t).sin();
    }
}
