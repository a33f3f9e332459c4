use mlp::prelude::*;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let x = array![[0., 0.], [0., 1.], [1., 0.], [1., 1.]];
    let y = array![[0.], [1.], [1.], [0.]];

    let mut model = Network::builder()
        .inputs(2)
        .hidden(4)
        .outputs(1)
        .activation(Activation::Tanh)
        .seed(7)
        .build()?;

    println!("{}", model.summary());

    // Two mini-batches of two samples per epoch
    let losses = model.fit(&x, &y, 2000, 2, 0.2, false)?;
    info!("final epoch loss: {:.6}", losses.last().copied().unwrap_or_default());

    for (input, target) in x.outer_iter().zip(y.outer_iter()) {
        let prediction = model.predict(&input.to_owned())?;
        println!("{} -> {:.4} (target {})", input, prediction[0], target[0]);
    }

    write_losses_to_csv(&losses, "xor_losses.csv")?;
    info!("loss curve written to xor_losses.csv");

    Ok(())
}
