//! Contract checks against a NumPy reference.
//!
//! `cargo run -p xtask -- contracts` replays the convolution kernels, the
//! radix-2 transform, and spectrum magnitudes against NumPy over a Python
//! subprocess, prints an error summary per case, and writes a JSON bundle
//! under `target/contracts/`.

use anyhow::{anyhow, bail, Context, Result};
use convolab::kernel::KernelLifecycle;
use convolab::signal::convolve::{ConvolveConfig, ConvolveKernel, ConvolveMethod};
use convolab::signal::fourier;
use convolab::signal::spectrum::{SpectrumConfig, SpectrumKernel};
use convolab::signal::traits::{Convolve1D, SpectrumAnalyze1D};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_PYTHON_BIN: &str = "python3";

const PY_REFERENCE_SCRIPT: &str = r#"
import json
import sys
import numpy as np

env = json.loads(sys.stdin.read())
op = env["op"]
p = env["payload"]

def _as_array(key):
    return np.asarray(p[key], dtype=float)

if op == "convolve":
    y = np.convolve(_as_array("in1"), _as_array("in2"), mode="full")
    out, out_im = y, None
elif op == "fft":
    y = np.fft.fft(_as_array("input"))
    out, out_im = y.real, y.imag
elif op == "spectrum_magnitude":
    y = np.abs(np.fft.fft(_as_array("input"), n=int(p["nfft"])))
    out, out_im = y, None
else:
    raise RuntimeError(f"unsupported op: {op}")

print(json.dumps({
    "output": out.tolist(),
    "output_im": None if out_im is None else out_im.tolist(),
    "python_version": sys.version.split()[0],
    "numpy_version": np.__version__,
}))
"#;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct PythonEval {
    output: Vec<f64>,
    output_im: Option<Vec<f64>>,
    python_version: String,
    numpy_version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    len: usize,
    max_abs: f64,
    mae: f64,
    rmse: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    python_executable: String,
    python_version: String,
    numpy_version: String,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("contracts") => run_contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

fn run_contracts() -> Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let out_dir = PathBuf::from(format!("target/contracts/{ts}"));
    fs::create_dir_all(&out_dir).context("creating contract output directory")?;

    let python_bin =
        std::env::var("CONVOLAB_PYTHON").unwrap_or_else(|_| DEFAULT_PYTHON_BIN.to_string());

    // Shared synthetic inputs: a power-of-two tone mix and a Gaussian kernel.
    let x: Vec<f64> = (0..256)
        .map(|i| {
            let t = i as f64 / 27.0;
            t.sin() + 0.35 * (2.3 * t).cos() + 0.1 * (7.0 * t).sin()
        })
        .collect();
    let h: Vec<f64> = (0..63)
        .map(|i| {
            let t = (i as f64 - 31.0) / 8.0;
            (-t * t / 2.0).exp()
        })
        .collect();

    let mut rows: Vec<ContractRow> = Vec::new();
    let mut python_version = String::new();
    let mut numpy_version = String::new();

    // Direct and spectral convolution against np.convolve.
    for (case_id, method) in [
        ("convolve_direct", ConvolveMethod::Direct),
        ("convolve_spectral", ConvolveMethod::Spectral),
    ] {
        let kernel = ConvolveKernel::try_new(ConvolveConfig { method })?;
        let candidate = kernel
            .run_alloc(x.as_slice(), h.as_slice())
            .map_err(|e| anyhow!("{case_id} execution failed: {e}"))?;
        let py = python_eval(&python_bin, "convolve", json!({ "in1": x, "in2": h }))?;
        python_version = py.python_version.clone();
        numpy_version = py.numpy_version.clone();
        rows.push(error_row(case_id, &candidate, &py.output)?);
    }

    // Forward transform against np.fft.fft, real and imaginary parts.
    {
        let mut buf = fourier::complex_buffer(&x, x.len());
        fourier::fft(&mut buf).map_err(|e| anyhow!("fft execution failed: {e}"))?;
        let py = python_eval(&python_bin, "fft", json!({ "input": x }))?;
        let reference_im = py
            .output_im
            .as_ref()
            .context("fft reference is missing imaginary parts")?;

        let re: Vec<f64> = buf.iter().map(|c| c.re).collect();
        let im: Vec<f64> = buf.iter().map(|c| c.im).collect();
        rows.push(error_row("fft_real", &re, &py.output)?);
        rows.push(error_row("fft_imag", &im, reference_im)?);
    }

    // Spectrum magnitudes against |np.fft.fft|.
    {
        let kernel = SpectrumKernel::try_new(SpectrumConfig { sample_rate: 100.0 })?;
        let spectrum = kernel
            .run_alloc(x.as_slice())
            .map_err(|e| anyhow!("spectrum execution failed: {e}"))?;
        let py = python_eval(
            &python_bin,
            "spectrum_magnitude",
            json!({ "input": x, "nfft": spectrum.len() }),
        )?;
        rows.push(error_row(
            "spectrum_magnitude",
            spectrum.magnitude(),
            &py.output,
        )?);
    }

    for row in &rows {
        println!(
            "{:<24} len {:>5}  max_abs {:>10.3e}  mae {:>10.3e}  rmse {:>10.3e}",
            row.case_id, row.len, row.max_abs, row.mae, row.rmse
        );
    }

    let worst = rows.iter().map(|r| r.max_abs).fold(0.0f64, f64::max);

    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        python_executable: python_bin,
        python_version,
        numpy_version,
        rows,
    };
    let report_path = out_dir.join("report.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&bundle).context("serializing contract bundle")?,
    )
    .context("writing contract report")?;
    println!("\nreport: {}", report_path.display());

    if worst > 1e-9 {
        bail!("worst-case deviation {worst:.3e} exceeds the 1e-9 contract bound");
    }
    Ok(())
}

fn error_row(case_id: &str, candidate: &[f64], reference: &[f64]) -> Result<ContractRow> {
    if candidate.len() != reference.len() {
        bail!(
            "{case_id}: candidate length {} does not match reference length {}",
            candidate.len(),
            reference.len()
        );
    }
    let n = candidate.len() as f64;
    let mut max_abs = 0.0f64;
    let mut abs_sum = 0.0f64;
    let mut sq_sum = 0.0f64;
    for (c, r) in candidate.iter().zip(reference.iter()) {
        let err = (c - r).abs();
        max_abs = max_abs.max(err);
        abs_sum += err;
        sq_sum += err * err;
    }
    Ok(ContractRow {
        case_id: case_id.to_string(),
        len: candidate.len(),
        max_abs,
        mae: abs_sum / n,
        rmse: (sq_sum / n).sqrt(),
    })
}

fn python_eval(python_bin: &str, op: &str, payload: serde_json::Value) -> Result<PythonEval> {
    let mut child = Command::new(python_bin)
        .arg("-c")
        .arg(PY_REFERENCE_SCRIPT)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning python interpreter `{python_bin}`"))?;

    {
        let stdin = child.stdin.as_mut().context("opening python stdin")?;
        let envelope = json!({ "op": op, "payload": payload });
        let bytes = serde_json::to_vec(&envelope).context("serializing python payload")?;
        stdin
            .write_all(&bytes)
            .context("writing payload to python stdin")?;
    }

    let output = child
        .wait_with_output()
        .context("waiting for python reference process")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("python reference for `{op}` failed: {stderr}");
    }
    serde_json::from_slice(&output.stdout)
        .with_context(|| format!("parsing python reference output for `{op}`"))
}
