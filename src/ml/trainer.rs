// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
// Backend split:
//   - Training uses Autodiff<NdArray> for gradients
//   - model.valid() returns the model on plain NdArray, so
//     validation batches skip the autodiff overhead
//
// Loss policy: cross-entropy over EVERY flattened position,
// padding included — the reference training policy.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    nn::loss::CrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SummaryBatcher, dataset::SummaryDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{Seq2SeqConfig, Seq2SeqModel};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
type ValidBackend = burn::backend::NdArray;

pub fn run_training(
    cfg:           &TrainConfig,
    model_cfg:     &Seq2SeqConfig,
    train_dataset: SummaryDataset,
    val_dataset:   SummaryDataset,
    ckpt_manager:  CheckpointManager,
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    tracing::info!("Using NdArray device: {:?}", device);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: Seq2SeqModel<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: latent_dim={}, source_vocab={}, target_vocab={}",
        model_cfg.latent_dim,
        model_cfg.source_vocab_size,
        model_cfg.target_vocab_size,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = SummaryBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (inner backend) ────────────────────────────────
    let val_batcher = SummaryBatcher::<ValidBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

    // ── Epoch loop (fixed count, no early stopping) ───────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(
                batch.input_ids,
                batch.decoder_input_ids,
                batch.label_ids,
            );

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → Seq2SeqModel<ValidBackend>
        let model_valid = model.valid();

        let mut val_loss_sum    = 0.0f64;
        let mut val_batches     = 0usize;
        let mut correct_tokens  = 0usize;
        let mut total_tokens    = 0usize;

        for batch in val_loader.iter() {
            let logits = model_valid.forward_train(
                batch.input_ids,
                batch.decoder_input_ids,
            );
            let [b, t, classes] = logits.dims();

            let flat_logits = logits.reshape([b * t, classes]);
            let flat_labels = batch.label_ids.reshape([b * t]);

            let ce = CrossEntropyLossConfig::new()
                .init(&flat_logits.device());
            let batch_loss: f64 = ce
                .forward(flat_logits.clone(), flat_labels.clone())
                .into_scalar()
                .elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches  += 1;

            // Next-token accuracy over all positions (padding
            // included, consistent with the loss)
            let predictions = flat_logits.argmax(1).reshape([b * t]);
            let correct: i64 = predictions
                .equal(flat_labels)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();

            correct_tokens += correct as usize;
            total_tokens   += b * t;
        }

        let avg_val_loss = if val_batches  > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let val_acc      = if total_tokens > 0 { correct_tokens as f64 / total_tokens as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc))?;

        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(())
}
