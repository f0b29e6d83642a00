//! Random-action rollout on the Red Brinstar catalog.
//!
//! Runs a small batch with uniformly random actions and a staggered reset
//! before every step, printing instance 0 as text every 50 steps.
//!
//! ```text
//! cargo run -p maze-bench --example random_rollout
//! ```

use maze_bench::{red_brinstar_catalog, reference_profile};
use maze_engine::{MazeEnv, TextRenderer};
use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let num_envs = 3;
    let mut env = MazeEnv::new(red_brinstar_catalog()?, reference_profile(num_envs, 0))?;
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut renderer = TextRenderer::new();

    for step in 0..200 {
        env.staggered_reset();
        let actions: Vec<u32> = (0..num_envs)
            .map(|_| rng.random_range(0..env.num_actions()))
            .collect();
        let metrics = env.step(&actions)?;

        if step % 50 == 0 {
            env.render(0, &mut renderer)?;
            println!(
                "step {step}: mean reward {:.2}, overlap {}",
                metrics.mean_reward, metrics.total_overlap
            );
            println!("{}\n", renderer.output());
        }
    }
    Ok(())
}
