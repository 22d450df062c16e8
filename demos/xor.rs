use digit_net::{target_vector, NeuralNetwork};

fn main() -> digit_net::Result<()> {
    // Two output units: class 0 = "inputs agree", class 1 = "inputs differ".
    let mut network = NeuralNetwork::new(2, 4, 2, 0.5)?;

    let samples = [
        ([0.01, 0.01], 0),
        ([0.01, 0.99], 1),
        ([0.99, 0.01], 1),
        ([0.99, 0.99], 0),
    ];

    let epochs = 10000;

    for epoch in 0..epochs {
        let mut loss = 0.0;
        for (input, label) in &samples {
            loss += network.train(input, &target_vector(*label, 2)?)?;
        }
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {:.6}", loss / samples.len() as f64);
        }
    }

    for (input, label) in &samples {
        let (_, output) = network.forward(input)?;
        println!(
            "Input: {:?} -> Output: {:.4?} predicted {} expected {}",
            input,
            output.data(),
            network.predict(input)?,
            label
        );
    }
    Ok(())
}
