use std::env;
use std::time::Instant;

use block_mult_types::Matrix;
use rand::Rng;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let mut config = matrix_mul::Config::from_env()?;
    if let Some(addr) = args.get(1) {
        config.set_server_addr(addr)?;
    }
    let mode = args.get(2).cloned().unwrap_or_else(|| "demo".to_string());

    println!("Connecting to {}...", config.server_addr());
    let multiplier = config.connect().await?;

    let (a, b) = match mode.as_str() {
        "demo" => (demo_matrix(), demo_matrix()),
        "random" => {
            let n: usize = args.get(3).unwrap_or(&"8".to_string()).parse()?;
            (random_matrix(n)?, random_matrix(n)?)
        }
        _ => {
            eprintln!("Unknown mode: {}", mode);
            eprintln!("Usage: {} [host:port] [mode] [args...]", args[0]);
            eprintln!("Modes:");
            eprintln!("  demo         - Multiply the 4x4 sample matrix by itself (default)");
            eprintln!("  random <n>   - Multiply two random n×n matrices");
            std::process::exit(1);
        }
    };

    println!("Matrix A ({0}x{0}):", a.dim());
    print!("{}", a);
    println!("Matrix B ({0}x{0}):", b.dim());
    print!("{}", b);

    let started = Instant::now();
    let result = multiplier.multiply(&a, &b).await?;

    println!(
        "Result ({0}x{0}, block size {1}, {2:?}):",
        result.dim(),
        multiplier.block_size(),
        started.elapsed()
    );
    print!("{}", result);

    Ok(())
}

fn demo_matrix() -> Matrix {
    let mut m = Matrix::zeros(4);
    let mut val = 1.0;
    for i in 0..4 {
        for j in 0..4 {
            m.set(i, j, val);
            val += 1.0;
        }
    }
    m
}

fn random_matrix(n: usize) -> Result<Matrix, block_mult_types::MatrixError> {
    let mut rng = rand::thread_rng();
    let rows = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(-9..=9) as f64).collect())
        .collect();
    Matrix::from_rows(rows)
}
