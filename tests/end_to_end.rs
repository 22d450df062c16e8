use std::fmt::Write as _;
use std::path::Path;

use digit_net::data::mnist::MNIST_PIXELS;
use digit_net::{evaluate, load_mnist_csv, train_network, NeuralNetwork, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

const BLOCK: usize = MNIST_PIXELS / 10;

/// Writes a dataset where digit `d` lights up pixel block `d` and nothing else.
fn write_block_digits(path: &Path, copies: usize) {
    let mut text = String::from("label");
    for i in 0..MNIST_PIXELS {
        write!(text, ",p{}", i).unwrap();
    }
    text.push('\n');

    for _ in 0..copies {
        for digit in 0..10 {
            write!(text, "{}", digit).unwrap();
            for i in 0..MNIST_PIXELS {
                let on = i / BLOCK == digit;
                text.push_str(if on { ",255" } else { ",0" });
            }
            text.push('\n');
        }
    }
    std::fs::write(path, text).unwrap();
}

#[test]
fn train_save_load_evaluate() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("digits.csv");
    let model_path = dir.path().join("model.bin");
    write_block_digits(&data_path, 2);

    let samples = load_mnist_csv(&data_path).unwrap();
    assert_eq!(samples.len(), 20);
    assert!(samples.iter().all(|s| s.input.len() == MNIST_PIXELS));
    assert_eq!(samples[3].label, 3);

    let mut network =
        NeuralNetwork::with_rng(MNIST_PIXELS, 32, 10, 0.3, &mut StdRng::seed_from_u64(2024)).unwrap();
    let before = evaluate(&network, &samples).unwrap();

    let history = train_network(&mut network, &samples, &TrainConfig::new(150)).unwrap();
    assert_eq!(history.len(), 150);
    assert!(history.last().unwrap().mean_loss < history[0].mean_loss);

    let after = evaluate(&network, &samples).unwrap();
    assert!(
        after.accuracy() >= 0.8 && after.accuracy() > before.accuracy(),
        "accuracy {} -> {}",
        before.accuracy(),
        after.accuracy()
    );

    network.save(&model_path).unwrap();
    let restored = NeuralNetwork::load(&model_path).unwrap();
    assert_eq!(restored, network);
    for sample in &samples {
        assert_eq!(
            restored.predict(&sample.input).unwrap(),
            network.predict(&sample.input).unwrap()
        );
    }
    assert_eq!(evaluate(&restored, &samples).unwrap(), after);
}

#[test]
fn wrong_width_dataset_is_rejected_by_network() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("narrow.csv");
    std::fs::write(&data_path, "label,a,b\n1,0,255\n").unwrap();

    let samples = load_mnist_csv(&data_path).unwrap();
    let mut network = NeuralNetwork::new(MNIST_PIXELS, 8, 10, 0.1).unwrap();
    let snapshot = network.clone();
    assert!(train_network(&mut network, &samples, &TrainConfig::new(1)).is_err());
    assert_eq!(network, snapshot);
}
