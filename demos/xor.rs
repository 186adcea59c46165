use ferrite_cycle::{
    train, ActivationFunction, Batch, CyclicLr, Matrix, MseLoss, Network, ScheduleConfig, Sgd,
    TrainConfig,
};
use ferrite_cycle::train::NullSink;

fn main() -> ferrite_cycle::Result<()> {
    let mut network = Network::new(vec![
        (4, 2, ActivationFunction::Tanh),
        (1, 4, ActivationFunction::Sigmoid),
    ]);

    let inputs = Matrix::from_rows(&[
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ]);
    let expected_outputs = Matrix::from_rows(&[vec![1.0], vec![0.0], vec![1.0], vec![0.0]]);
    let data = vec![Batch::new(inputs.clone(), expected_outputs)];

    // Restart at lr 2.0 every 500 epochs, halving every 100.
    let schedule = ScheduleConfig::Cyclic(CyclicLr::new(2.0, 500, 100, 0.5)?);
    let config = TrainConfig::new(2000, 4, schedule).with_seed(0);

    let outcome = train(&mut network, &MseLoss, &data, &data, |lr| Sgd::with_momentum(lr, 0.9), &config, &mut NullSink)?;

    for (epoch, loss) in outcome.val_losses.iter().enumerate().step_by(250) {
        println!("Epoch {}: loss = {loss:.6}", epoch + 1);
    }

    for i in 0..inputs.rows {
        let input = inputs.row(i);
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)[0]);
    }
    Ok(())
}
