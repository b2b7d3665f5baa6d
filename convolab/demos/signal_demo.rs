//! Guided tour of the convolution engine.
//!
//! Non-interactive rendition of the classic teaching demo: generate a few
//! signals, convolve them three ways, inspect the spectrum, and export the
//! result as CSV.
//!
//! Run with `cargo run --example signal_demo`.

use convolab::export::save_signal_csv;
use convolab::render::{render_signal, render_spectrum, signal_summary};
use convolab::signal::{
    analyze_spectrum, convolve_circular, convolve_linear, convolve_spectral, wave, window_signal,
    windows::WindowKind, Signal,
};

fn banner(title: &str) {
    println!("\n==================================================");
    println!("  {title}");
    println!("==================================================\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    basic_convolution()?;
    signal_filtering()?;
    frequency_analysis()?;
    system_impulse_response()?;
    export_example()?;
    Ok(())
}

/// Sine wave convolved with a short rectangular pulse, linear vs circular.
fn basic_convolution() -> Result<(), Box<dyn std::error::Error>> {
    banner("BASIC CONVOLUTION");
    println!("Convolving a 5 Hz sine wave with a rectangular pulse.\n");

    let sine = wave::sine_wave(5.0, 1.0, 0.0, 0.5, 1000.0)?;
    let mut pulse = Signal::zeros(50, 1000.0)?;
    pulse.samples_mut().fill(1.0 / 50.0);
    pulse.set_label("Rectangular Pulse");

    let linear = convolve_linear(&sine, &pulse)?;
    let circular = convolve_circular(&sine, &pulse)?;

    print!("{}", render_signal(&sine, 80, 15)?);
    print!("{}", render_signal(&linear, 80, 15)?);
    println!(
        "Linear output: {} samples (input {} + kernel {} - 1)",
        linear.len(),
        sine.len(),
        pulse.len()
    );
    println!(
        "Circular output: {} samples (max of the operand lengths)\n",
        circular.len()
    );
    Ok(())
}

/// Moving-average lowpass applied to a noisy two-tone signal.
fn signal_filtering() -> Result<(), Box<dyn std::error::Error>> {
    banner("CONVOLUTION AS FILTERING");
    println!("A 50 Hz tone buried in a 300 Hz tone plus noise, smoothed by a");
    println!("moving-average kernel.\n");

    let mut signal = wave::sine_wave(50.0, 0.8, 0.0, 0.2, 2000.0)?;
    let high = wave::sine_wave(300.0, 0.3, 0.0, 0.2, 2000.0)?;
    let noise = wave::white_noise(0.1, 0.2, 2000.0, 0xC0FFEE)?;
    for ((s, h), n) in signal
        .samples_mut()
        .iter_mut()
        .zip(high.samples())
        .zip(noise.samples())
    {
        *s += h + n;
    }
    signal.set_label("50Hz + 300Hz + noise");

    let mut lowpass = Signal::zeros(25, 2000.0)?;
    lowpass.samples_mut().fill(1.0 / 25.0);
    lowpass.set_label("Moving Average (25 taps)");

    let filtered = convolve_linear(&signal, &lowpass)?;
    print!("{}", render_signal(&signal, 80, 15)?);
    print!("{}", render_signal(&filtered, 80, 15)?);
    println!("The 300 Hz component and the noise floor are visibly attenuated.\n");
    Ok(())
}

/// Direct vs spectral convolution, and the spectrum of the result.
fn frequency_analysis() -> Result<(), Box<dyn std::error::Error>> {
    banner("FREQUENCY DOMAIN ANALYSIS");
    println!("Convolution in time is multiplication in frequency.\n");

    let tone = wave::sine_wave(10.0, 1.0, 0.0, 0.5, 1000.0)?;
    let pulse = wave::gaussian_pulse(1.0, 0.01, 0.1, 0.2, 1000.0)?;

    let direct = convolve_linear(&tone, &pulse)?;
    let spectral = convolve_spectral(&tone, &pulse)?;
    let max_err = direct
        .samples()
        .iter()
        .zip(spectral.samples())
        .map(|(d, s)| (d - s).abs())
        .fold(0.0f64, f64::max);
    println!("Direct vs spectral agreement: max |difference| = {max_err:.3e}\n");

    let windowed = window_signal(&tone, WindowKind::Hann)?;
    let spectrum = analyze_spectrum(&windowed)?;
    print!("{}", render_spectrum(&spectrum, 80, 15)?);
    Ok(())
}

/// Step input driven through a decaying-exponential impulse response.
fn system_impulse_response() -> Result<(), Box<dyn std::error::Error>> {
    banner("SYSTEM IMPULSE RESPONSE");
    println!("Convolution characterizes LTI systems: output = input * h.\n");

    let mut step = Signal::zeros(500, 1000.0)?;
    let quarter = step.len() / 4;
    for (i, v) in step.samples_mut().iter_mut().enumerate() {
        *v = if i > quarter { 1.0 } else { 0.0 };
    }
    step.set_label("Step Input");

    let tau = 50.0;
    let mut response = Signal::zeros(200, 1000.0)?;
    for (i, v) in response.samples_mut().iter_mut().enumerate() {
        *v = (-(i as f64) / tau).exp() / tau;
    }
    response.set_label("System Impulse Response");

    let output = convolve_linear(&step, &response)?;
    print!("{}", render_signal(&step, 80, 12)?);
    print!("{}", render_signal(&output, 80, 12)?);
    println!("{}", signal_summary(&output));
    Ok(())
}

/// Persist a generated signal for external tooling.
fn export_example() -> Result<(), Box<dyn std::error::Error>> {
    banner("CSV EXPORT");

    let signal = wave::triangle_wave(25.0, 1.0, 0.1, 1000.0)?;
    let path = std::env::temp_dir().join("convolab_demo_signal.csv");
    save_signal_csv(&signal, &path)?;
    println!("Signal saved to {}", path.display());
    Ok(())
}
