use evo_sampling::create_sampling_method;
use evo_types::{SamplingConfig, SamplingKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🌟 Evoxide Sampling Basic Usage Example");

    let dimension = 1000;

    // Plain Gaussian sampling: the token is the generator seed.
    let config = SamplingConfig::new(SamplingKind::Gaussian).with_std_dev(0.02);
    let gaussian = create_sampling_method(&config)?;

    let (noise, token) = gaussian.sample(dimension)?;
    println!(
        "Sampled {} values with strategy '{}', token {:?}",
        noise.len(),
        gaussian.name(),
        token
    );

    let rebuilt = gaussian.resample(token, dimension)?;
    println!("Reconstruction identical: {}", rebuilt == noise);

    // Cache-backed sampling: one shared table, tokens are (offset, sign).
    // Every process that builds from the same config holds the same table.
    let config = SamplingConfig::new(SamplingKind::CachedGaussian)
        .with_std_dev(0.02)
        .with_cache_table_size(1_000_000)
        .with_seed(42)
        .with_param_dim(dimension);
    let coordinator = create_sampling_method(&config)?;
    let peer = create_sampling_method(&config)?;

    let (noise, token) = coordinator.sample(dimension)?;
    println!(
        "Sampled {} values with strategy '{}', token {:?}",
        noise.len(),
        coordinator.name(),
        token
    );

    // A peer worker reconstructs the same vector from the token alone.
    let rebuilt = peer.resample(token, dimension)?;
    println!("Peer reconstruction identical: {}", rebuilt == noise);

    // Mirrored sampling: flip the sign bit to get the -noise variant.
    if let evo_types::SampleToken::Slice { offset, negated } = token {
        let mirror = peer.resample(
            evo_types::SampleToken::Slice {
                offset,
                negated: !negated,
            },
            dimension,
        )?;
        let antisymmetric = noise.iter().zip(&mirror).all(|(a, b)| *a == -b);
        println!("Mirrored variant is the exact negation: {antisymmetric}");
    }

    Ok(())
}
