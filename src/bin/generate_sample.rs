use std::fs::File;
use std::io::{BufWriter, Write};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Line flux response centered somewhere in the (log n_H, log Φ_H) plane.
fn bump(x: f64, y: f64, mu_x: f64, mu_y: f64, sigma: f64, amplitude: f64) -> f64 {
    let d2 = (x - mu_x).powi(2) + (y - mu_y).powi(2);
    amplitude * (-d2 / (2.0 * sigma.powi(2))).exp()
}

fn write_line_table(rng: &mut SimpleRng) -> std::io::Result<()> {
    const NX: usize = 9;
    const NY: usize = 9;
    const X_MIN: f64 = 7.0;
    const X_MAX: f64 = 14.0;
    const Y_MIN: f64 = 17.0;
    const Y_MAX: f64 = 24.0;

    // (header, center x, center y, width, peak flux relative to reference)
    let lines = [
        ("H  1 4861.33A", 9.0, 20.0, 2.5, 0.08),
        ("O  3 5007.07A", 10.5, 21.5, 1.8, 0.30),
        ("He 2 1640.43A", 12.0, 22.5, 2.0, 0.05),
        ("C  4 1549.00A", 11.0, 19.0, 2.2, 0.12),
    ];

    let file = File::create("sample_lines.tsv")?;
    let mut out = BufWriter::new(file);

    write!(out, "#lineslist\tInci 1215.00A ")?;
    for (name, ..) in &lines {
        write!(out, "\t{name}")?;
    }
    writeln!(out)?;

    // Rows flattened x-major: row i covers (i / NY, i % NY).
    for ix in 0..NX {
        for iy in 0..NY {
            let x = X_MIN + (X_MAX - X_MIN) * ix as f64 / (NX - 1) as f64;
            let y = Y_MIN + (Y_MAX - Y_MIN) * iy as f64 / (NY - 1) as f64;

            let reference = 1.0e4 * (1.0 + rng.gauss(0.0, 0.02));
            write!(out, "model_{:03}\t{:.6e}", ix * NY + iy, reference)?;

            for &(_, mu_x, mu_y, sigma, peak) in &lines {
                let flux =
                    reference * bump(x, y, mu_x, mu_y, sigma, peak) * (1.0 + rng.gauss(0.0, 0.05));
                if flux < 1.0 {
                    // Grid output marks undetected lines non-numerically.
                    write!(out, "\tn/a")?;
                } else {
                    write!(out, "\t{flux:.6e}")?;
                }
            }
            writeln!(out)?;
        }
    }

    out.flush()?;
    println!("Wrote sample_lines.tsv ({NX} x {NY} grid, {} line columns)", lines.len());
    Ok(())
}

fn write_continuum(rng: &mut SimpleRng) -> std::io::Result<()> {
    const N_POINTS: usize = 300;

    let file = File::create("continuum.cont")?;
    let mut out = BufWriter::new(file);

    writeln!(out, "#energy/eV\tincident\ttransmitted")?;

    for i in 0..N_POINTS {
        // Log-spaced energies from 1e-3 to 2e8 eV.
        let log_e = -3.0 + 11.3 * i as f64 / (N_POINTS - 1) as f64;
        let energy = 10f64.powf(log_e);

        // Big-bump incident continuum with a high-energy cutoff.
        let incident =
            1.0e6 * energy.powf(0.4) * (-energy / 3.0e5).exp() * (1.0 + rng.gauss(0.0, 0.03)).abs();

        // Absorption trough above the hydrogen ionization edge.
        let tau = 4.0 * (-(log_e - 2.0).powi(2) / 2.0).exp();
        let transmitted = incident * (-tau).exp();

        writeln!(out, "{energy:.6e}\t{incident:.6e}\t{transmitted:.6e}")?;
    }

    out.flush()?;
    println!("Wrote continuum.cont ({N_POINTS} rows)");
    Ok(())
}

fn main() -> std::io::Result<()> {
    let mut rng = SimpleRng::new(42);

    write_line_table(&mut rng)?;
    write_continuum(&mut rng)?;

    println!();
    println!("Try:");
    println!(
        "  cloudy-plots --file-path sample_lines.tsv --nx 9 --ny 9 \\\n    \
         --x-min 7 --x-max 14 --y-min 17 --y-max 24"
    );
    Ok(())
}
