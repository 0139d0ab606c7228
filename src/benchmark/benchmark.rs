use std::time::Instant;

use crate::simulation::engine::Simulator3;
use crate::simulation::error::Result;
use crate::simulation::params::Parameters;
use crate::simulation::states::Body3;
use crate::simulation::scenario::SOLAR_MASS;

/// Helper to build a simulator of `n` stars spread over a few thousand Mm
fn make_simulator(n: usize, parallel: bool) -> Result<Simulator3> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = [
            (i_f * 0.37).sin() * 5000.0,
            (i_f * 0.13).cos() * 5000.0,
            (i_f * 0.07).sin() * 5000.0 + i_f,
        ];
        bodies.push(Body3::new(SOLAR_MASS, &x, &[0.0, 0.0, 0.0], format!("star {}", i))?);
    }

    let params = Parameters {
        parallel,
        ..Parameters::default()
    };
    Simulator3::with_parameters(bodies, &params)
}

/// Time sequential vs rayon force accumulation for a range of n
pub fn bench_forces() -> Result<()> {
    let ns = [10, 50, 100, 200, 400, 800, 1600];
    let reps = 5;

    for n in ns {
        let sim = make_simulator(n, false)?;

        // Warm up
        sim.accumulate_forces()?;

        let t0 = Instant::now();
        for _ in 0..reps {
            sim.accumulate_forces()?;
        }
        let seq = t0.elapsed().as_secs_f64() / reps as f64;

        let mut sim = sim;
        sim.set_parallel(true);
        sim.accumulate_forces()?;

        let t1 = Instant::now();
        for _ in 0..reps {
            sim.accumulate_forces()?;
        }
        let par = t1.elapsed().as_secs_f64() / reps as f64;

        println!("N = {:5}, sequential = {:8.6} s, parallel = {:8.6} s", n, seq, par);
    }
    Ok(())
}

/// Per-step cost of full Euler steps for growing n, as CSV lines
pub fn bench_steps_curve() -> Result<()> {
    println!("N,sequential_ms,parallel_ms");

    for n in (50..=1000).step_by(50) {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 200 { 20 } else { 3 };

        let mut sim_seq = make_simulator(n, false)?;
        let t0 = Instant::now();
        sim_seq.run(steps, 1.0)?;
        let ms_seq = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut sim_par = make_simulator(n, true)?;
        let t1 = Instant::now();
        sim_par.run(steps, 1.0)?;
        let ms_par = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_seq, ms_par);
    }
    Ok(())
}
