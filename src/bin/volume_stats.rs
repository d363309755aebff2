use probevol::io::volume_asset::read_volume_atlas;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <volume.exr>", args[0]);
        std::process::exit(1);
    }

    let (resolution, texels) = match read_volume_atlas(&args[1]) {
        Ok(volume) => volume,
        Err(e) => {
            eprintln!("failed to read {}: {}", args[1], e);
            std::process::exit(1);
        }
    };

    let mut min = [f32::INFINITY; 4];
    let mut max = [f32::NEG_INFINITY; 4];
    let mut sum = [0.0f64; 4];

    for texel in &texels {
        for c in 0..4 {
            min[c] = min[c].min(texel[c]);
            max[c] = max[c].max(texel[c]);
            sum[c] += texel[c] as f64;
        }
    }

    let n = texels.len().max(1) as f64;
    println!("Resolution: {}^3 ({} voxels)", resolution, texels.len());
    println!("Min RGBA: {:.6}, {:.6}, {:.6}, {:.6}", min[0], min[1], min[2], min[3]);
    println!("Max RGBA: {:.6}, {:.6}, {:.6}, {:.6}", max[0], max[1], max[2], max[3]);
    println!("Mean RGBA: {:.6}, {:.6}, {:.6}, {:.6}",
             sum[0] / n, sum[1] / n, sum[2] / n, sum[3] / n);
}
