use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use pixblend::{
    Bits, BitsMut, CompositeRect, CoverageMode, Filter, Fixed, Image, Implementation,
    ImplementationOpts, Operator, PixelFormat, Repeat, ScaleParams,
};
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    warmup: u32,
    repeats: u32,
    ops: Vec<Operator>,
    json_out: Option<PathBuf>,
}

/// One timed workload and the digest of the pixels it produced.
#[derive(Clone, Debug)]
struct Sample {
    name: String,
    runs: Vec<Duration>,
    digest: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {w}x{h}, {ops} operator(s)",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        w = args.width,
        h = args.height,
        ops = args.ops.len(),
    );

    let vector = Implementation::default();
    let scalar = Implementation::new(ImplementationOpts::default().with_force_scalar(true));
    let general = Implementation::new(ImplementationOpts::default().with_fast_paths(false));

    let scene = Scene::new(args.width, args.height);
    let mut samples = Vec::new();

    for &op in &args.ops {
        for mode in [CoverageMode::Uniform, CoverageMode::Component] {
            let v = time(&args, &format!("combine/{}/{mode:?}/vector", op.name()), || {
                scene.combine_rows(&vector, op, mode)
            })?;
            let s = time(&args, &format!("combine/{}/{mode:?}/scalar", op.name()), || {
                scene.combine_rows(&scalar, op, mode)
            })?;
            if v.digest != s.digest {
                anyhow::bail!(
                    "vector and scalar {} {mode:?} combiners disagree ({} vs {})",
                    op.name(),
                    v.digest,
                    s.digest
                );
            }
            samples.extend([v, s]);
        }
    }

    for (label, op, masked) in [
        ("over_8888_8888", Operator::Over, false),
        ("over_8888_8_8888", Operator::Over, true),
        ("add_8888_8888", Operator::Add, false),
    ] {
        let fast = time(&args, &format!("composite/{label}/fast"), || {
            scene.composite(&vector, op, masked)
        })?;
        let slow = time(&args, &format!("composite/{label}/general"), || {
            scene.composite(&general, op, masked)
        })?;
        if fast.digest != slow.digest {
            anyhow::bail!("fast and general {label} paths disagree");
        }
        samples.extend([fast, slow]);
    }

    for (label, filter, op) in [
        ("nearest_over", Filter::Nearest, Operator::Over),
        ("bilinear_src", Filter::Bilinear, Operator::Src),
        ("bilinear_over", Filter::Bilinear, Operator::Over),
    ] {
        samples.push(time(&args, &format!("scale/{label}"), || {
            scene.scaled(&vector, filter, op)
        })?);
    }

    report_percentiles(&samples);

    if let Some(path) = &args.json_out {
        let report = json!({
            "width": args.width,
            "height": args.height,
            "repeats": args.repeats,
            "samples": samples.iter().map(|s| json!({
                "name": s.name,
                "p50_ns": percentile(&sorted(&s.runs), 0.50).as_nanos() as u64,
                "p90_ns": percentile(&sorted(&s.runs), 0.90).as_nanos() as u64,
                "sha256": s.digest,
            })).collect::<Vec<_>>(),
        });
        let text = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, text)
            .with_context(|| format!("write report '{}'", path.display()))?;
        eprintln!("report: {}", path.display());
    }
    Ok(())
}

/// Source, mask and destination surfaces shared by every workload.
struct Scene {
    width: u32,
    height: u32,
    src: Vec<u32>,
    mask_ca: Vec<u32>,
    mask_a8: Vec<u32>,
    dest: Vec<u32>,
}

impl Scene {
    fn new(width: u32, height: u32) -> Self {
        let n = (width * height) as usize;
        let mut seed = 0x5eed_0001_u64;
        let src = (0..n).map(|_| premultiplied(next(&mut seed))).collect();
        let mask_ca = (0..n).map(|_| next(&mut seed)).collect();
        let mask_a8 = (0..(width as usize).div_ceil(4) * height as usize)
            .map(|_| next(&mut seed))
            .collect();
        let dest = (0..n).map(|_| next(&mut seed) | 0xff00_0000).collect();
        Self {
            width,
            height,
            src,
            mask_ca,
            mask_a8,
            dest,
        }
    }

    fn combine_rows(
        &self,
        imp: &Implementation,
        op: Operator,
        mode: CoverageMode,
    ) -> anyhow::Result<Vec<u32>> {
        let w = self.width as usize;
        let mut out = self.dest.clone();
        for ((d, s), m) in out
            .chunks_mut(w)
            .zip(self.src.chunks(w))
            .zip(self.mask_ca.chunks(w))
        {
            imp.combine(op, mode, d, s, Some(m))?;
        }
        Ok(out)
    }

    fn composite(
        &self,
        imp: &Implementation,
        op: Operator,
        masked: bool,
    ) -> anyhow::Result<Vec<u32>> {
        let (w, h) = (self.width, self.height);
        let src = Image::Bits(Bits::new(PixelFormat::A8R8G8B8, w, h, w as usize, &self.src)?);
        let mask = if masked {
            let stride = (w as usize).div_ceil(4);
            Some(Image::Bits(Bits::new(PixelFormat::A8, w, h, stride, &self.mask_a8)?))
        } else {
            None
        };
        let mut out = self.dest.clone();
        let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, w, h, w as usize, &mut out)?;
        imp.composite(op, &src, mask.as_ref(), &mut dest, &CompositeRect::new(w, h))?;
        Ok(out)
    }

    fn scaled(&self, imp: &Implementation, filter: Filter, op: Operator) -> anyhow::Result<Vec<u32>> {
        let (w, h) = (self.width, self.height);
        let src = Bits::new(PixelFormat::A8R8G8B8, w, h, w as usize, &self.src)?;
        let mut out = self.dest.clone();
        let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, w, h, w as usize, &mut out)?;
        let params = ScaleParams::new(Fixed::from_f64(0.75), Fixed::from_f64(0.75))
            .with_offset(Fixed::from_f64(-3.25), Fixed::from_f64(1.5))
            .with_repeat(Repeat::Pad);
        imp.composite_scaled(op, filter, &src, None, &mut dest, &CompositeRect::new(w, h), &params)?;
        Ok(out)
    }
}

fn next(seed: &mut u64) -> u32 {
    *seed = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *seed;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    (z ^ (z >> 31)) as u32
}

fn premultiplied(p: u32) -> u32 {
    let a = p >> 24;
    let c = |shift: u32| (((p >> shift) & 0xff) * a / 255) << shift;
    (a << 24) | c(16) | c(8) | c(0)
}

fn time(
    args: &BenchArgs,
    name: &str,
    mut f: impl FnMut() -> anyhow::Result<Vec<u32>>,
) -> anyhow::Result<Sample> {
    for _ in 0..args.warmup {
        f().with_context(|| format!("warmup {name}"))?;
    }
    let mut runs = Vec::with_capacity(args.repeats as usize);
    let mut last = Vec::new();
    for _ in 0..args.repeats {
        let t0 = Instant::now();
        last = f().with_context(|| format!("run {name}"))?;
        runs.push(t0.elapsed());
    }
    Ok(Sample {
        name: name.to_string(),
        runs,
        digest: sha256_hex(&last),
    })
}

fn sha256_hex(pixels: &[u32]) -> String {
    let mut hasher = sha2::Sha256::new();
    for p in pixels {
        hasher.update(p.to_le_bytes());
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 1024,
        height: 256,
        warmup: 2,
        repeats: 50,
        ops: Operator::ALL.to_vec(),
        json_out: None,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--op" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --op"))?;
                let op = Operator::ALL
                    .into_iter()
                    .find(|op| op.name() == v)
                    .ok_or_else(|| anyhow::anyhow!("unknown --op '{v}'"))?;
                out.ops = vec![op];
            }
            "--json" => {
                out.json_out = Some(PathBuf::from(args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --json (expected a path)")
                })?))
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"pixblend-bench

Times combiners, composite paths and scaled composites and reports p50/p90/p99.
Vector and scalar combiners, and fast and general composite paths, must
produce identical pixels or the run fails.

Usage:
  cargo run -q --release
  cargo run -q --release -- --op over --repeats 200
  cargo run -q --release -- --json target/bench.json

Args:
  --width N      (default 1024)
  --height N     (default 256)
  --warmup N     (default 2)
  --repeats N    (default 50)
  --op NAME      only this operator's combiners (e.g. over, add, saturate)
  --json PATH    also write a JSON report
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn sorted(runs: &[Duration]) -> Vec<Duration> {
    let mut v = runs.to_vec();
    v.sort();
    v
}

fn percentile(v: &[Duration], p: f64) -> Duration {
    if v.is_empty() {
        return Duration::ZERO;
    }
    let n = v.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    v[rank - 1]
}

fn report_percentiles(samples: &[Sample]) {
    fn fmt_us(d: Duration) -> String {
        format!("{:.1}us", d.as_secs_f64() * 1e6)
    }

    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for s in samples {
        let v = sorted(&s.runs);
        eprintln!(
            "  {name:40} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = s.name,
            p50 = fmt_us(percentile(&v, 0.50)),
            p90 = fmt_us(percentile(&v, 0.90)),
            p99 = fmt_us(percentile(&v, 0.99)),
        );
    }
}
