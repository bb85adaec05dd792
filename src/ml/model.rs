use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig, LstmState,
    },
    prelude::*,
    tensor::activation::softmax,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct Seq2SeqConfig {
    /// Real tokens in the source vocabulary; embeddings are
    /// sized +1 for the padding sentinel at index 0
    pub source_vocab_size: usize,
    /// Real tokens in the target vocabulary
    pub target_vocab_size: usize,
    /// Hidden width shared by every recurrent layer ("latent width")
    pub latent_dim:        usize,
}

impl Seq2SeqConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Seq2SeqModel<B> {
        let d = self.latent_dim;
        let encoder_embedding = EmbeddingConfig::new(self.source_vocab_size + 1, d).init(device);
        let decoder_embedding = EmbeddingConfig::new(self.target_vocab_size + 1, d).init(device);
        let projection = LinearConfig::new(2 * d, self.target_vocab_size + 1).init(device);
        Seq2SeqModel {
            encoder_embedding,
            encoder_lstm1: LstmConfig::new(d, d, true).init(device),
            encoder_lstm2: LstmConfig::new(d, d, true).init(device),
            encoder_lstm3: LstmConfig::new(d, d, true).init(device),
            decoder_embedding,
            decoder_lstm:  LstmConfig::new(d, d, true).init(device),
            attention:     Attention {
                score: LinearConfig::new(d, d).with_bias(false).init(device),
            },
            projection,
        }
    }
}

// ─── Attention ────────────────────────────────────────────────────────────────
/// Bilinear ("general") attention: each decoder hidden vector
/// is scored against every encoder position through a learned
/// projection, normalised to a distribution over positions.
#[derive(Module, Debug)]
pub struct Attention<B: Backend> {
    pub score: Linear<B>,
}

impl<B: Backend> Attention<B> {
    /// query: decoder hidden states  [batch, steps, latent]
    /// keys:  encoder output states  [batch, in_len, latent]
    ///
    /// Returns (context, weights):
    ///   context [batch, steps, latent] — weighted sum of keys
    ///   weights [batch, steps, in_len] — rows sum to 1
    pub fn forward(&self, query: Tensor<B, 3>, keys: Tensor<B, 3>) -> (Tensor<B, 3>, Tensor<B, 3>) {
        // score[b, t, l] = query[b, t, :] · (W keys[b, l, :])
        let scores  = query.matmul(self.score.forward(keys.clone()).swap_dims(1, 2));
        let weights = softmax(scores, 2);
        let context = weights.clone().matmul(keys);
        (context, weights)
    }
}

// ─── Seq2SeqModel ─────────────────────────────────────────────────────────────
/// One set of named parameter tensors shared by the training
/// and inference call shapes. Sub-components are addressed by
/// field name, never by positional index, so the persisted
/// record survives architecture reshuffles.
#[derive(Module, Debug)]
pub struct Seq2SeqModel<B: Backend> {
    pub encoder_embedding: Embedding<B>,
    pub encoder_lstm1:     Lstm<B>,
    pub encoder_lstm2:     Lstm<B>,
    pub encoder_lstm3:     Lstm<B>,
    pub decoder_embedding: Embedding<B>,
    pub decoder_lstm:      Lstm<B>,
    pub attention:         Attention<B>,
    pub projection:        Linear<B>,
}

/// Output of one inference decode step.
pub struct DecodeStep<B: Backend> {
    /// Softmax distribution over the target vocabulary,
    /// shape [batch, target_vocab + 1]
    pub probs: Tensor<B, 2>,

    /// Attention weights over encoder positions for this step,
    /// shape [batch, in_len]
    pub attention: Tensor<B, 2>,

    /// Decoder (cell, hidden) state to carry into the next step
    pub state: LstmState<B, 2>,
}

impl<B: Backend> Seq2SeqModel<B> {
    /// Run the three-layer encoder stack over a padded input.
    ///
    /// input_ids: [batch, in_len] → (outputs [batch, in_len, latent],
    /// final (cell, hidden) state of the third layer).
    ///
    /// Each layer consumes the previous layer's full output
    /// sequence; padded positions are encoded like any other
    /// (the padding policy is statistical, not masked).
    pub fn encode(&self, input_ids: Tensor<B, 2, Int>) -> (Tensor<B, 3>, LstmState<B, 2>) {
        let embedded = self.encoder_embedding.forward(input_ids);
        let (out1, _) = self.encoder_lstm1.forward(embedded, None);
        let (out2, _) = self.encoder_lstm2.forward(out1, None);
        let (out3, state) = self.encoder_lstm3.forward(out2, None);
        (out3, state)
    }

    /// Teacher-forced forward pass: the whole shifted target
    /// sequence at once, attention computed for every step in
    /// parallel.
    ///
    /// input_ids [batch, in_len], decoder_input_ids [batch, steps]
    /// → logits [batch, steps, target_vocab + 1]
    pub fn forward_train(
        &self,
        input_ids:         Tensor<B, 2, Int>,
        decoder_input_ids: Tensor<B, 2, Int>,
    ) -> Tensor<B, 3> {
        let (encoder_outputs, encoder_state) = self.encode(input_ids);

        let embedded = self.decoder_embedding.forward(decoder_input_ids);
        let (decoder_outputs, _) = self.decoder_lstm.forward(embedded, Some(encoder_state));

        let (context, _weights) =
            self.attention.forward(decoder_outputs.clone(), encoder_outputs);
        let merged = Tensor::cat(vec![decoder_outputs, context], 2);

        self.projection.forward(merged)
    }

    /// One autoregressive decode step: same math as one time
    /// step of forward_train, with the hidden state passed
    /// through explicitly because step t+1 depends on step t.
    ///
    /// token [batch, 1], encoder_outputs [batch, in_len, latent]
    pub fn forward_step(
        &self,
        token:           Tensor<B, 2, Int>,
        encoder_outputs: Tensor<B, 3>,
        state:           LstmState<B, 2>,
    ) -> DecodeStep<B> {
        let embedded = self.decoder_embedding.forward(token);
        let (decoder_outputs, state) = self.decoder_lstm.forward(embedded, Some(state));

        let (context, weights) =
            self.attention.forward(decoder_outputs.clone(), encoder_outputs);
        let merged = Tensor::cat(vec![decoder_outputs, context], 2);
        let logits = self.projection.forward(merged);

        let [batch, _, classes] = logits.dims();
        let [_, _, in_len] = weights.dims();

        DecodeStep {
            probs:     softmax(logits.reshape([batch, classes]), 1),
            attention: weights.reshape([batch, in_len]),
            state,
        }
    }

    /// Teacher-forced loss: categorical cross-entropy between
    /// each step's distribution and the true next token.
    /// Padding positions are included in the loss; that is the
    /// reference training policy, reproduced on purpose.
    pub fn forward_loss(
        &self,
        input_ids:         Tensor<B, 2, Int>,
        decoder_input_ids: Tensor<B, 2, Int>,
        label_ids:         Tensor<B, 2, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 3>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward_train(input_ids, decoder_input_ids);
        let [batch, steps, classes] = logits.dims();

        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(
            logits.clone().reshape([batch * steps, classes]),
            label_ids.reshape([batch * steps]),
        );
        (loss, logits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    type TestBackend = burn::backend::NdArray;

    fn device() -> burn::backend::ndarray::NdArrayDevice {
        Default::default()
    }

    fn tiny_model() -> Seq2SeqModel<TestBackend> {
        // 6 source tokens, 5 target tokens, latent width 8
        Seq2SeqConfig::new(6, 5, 8).init(&device())
    }

    fn int_tensor(values: &[i32], shape: [usize; 2]) -> Tensor<TestBackend, 2, Int> {
        Tensor::<TestBackend, 1, Int>::from_ints(values, &device()).reshape(shape)
    }

    #[test]
    fn test_encoder_preserves_sequence_length() {
        let model = tiny_model();
        let input = int_tensor(&[1, 2, 3, 0, 0, 0, 0], [1, 7]);
        let (outputs, _state) = model.encode(input);
        // One hidden vector per input position, padding included
        assert_eq!(outputs.dims(), [1, 7, 8]);
    }

    #[test]
    fn test_forward_train_projects_to_target_vocab() {
        let model = tiny_model();
        let input  = int_tensor(&[1, 2, 3, 4, 2, 1, 0, 0], [2, 4]);
        let dec_in = int_tensor(&[1, 3, 4, 1, 2, 0], [2, 3]);
        let logits = model.forward_train(input, dec_in);
        // target_vocab_size + 1 classes (padding sentinel slot)
        assert_eq!(logits.dims(), [2, 3, 6]);
    }

    #[test]
    fn test_step_distribution_and_attention_are_normalised() {
        let model = tiny_model();
        let input = int_tensor(&[1, 2, 3, 0], [1, 4]);
        let (encoder_outputs, state) = model.encode(input);

        let token = int_tensor(&[1], [1, 1]);
        let step  = model.forward_step(token, encoder_outputs, state);

        assert_eq!(step.probs.dims(), [1, 6]);
        assert_eq!(step.attention.dims(), [1, 4]);

        let probs_sum: f32 = step.probs.sum().into_scalar().elem();
        let attn_sum:  f32 = step.attention.clone().sum().into_scalar().elem();
        assert_relative_eq!(probs_sum, 1.0, epsilon = 1e-4);
        assert_relative_eq!(attn_sum, 1.0, epsilon = 1e-4);

        // Softmax output is non-negative everywhere
        let attn_min: f32 = step.attention.min().into_scalar().elem();
        assert!(attn_min >= 0.0);
    }

    #[test]
    fn test_step_state_threads_through_repeated_calls() {
        let model = tiny_model();
        let input = int_tensor(&[1, 2, 0], [1, 3]);
        let (encoder_outputs, state) = model.encode(input);

        let first  = model.forward_step(int_tensor(&[1], [1, 1]), encoder_outputs.clone(), state);
        let second = model.forward_step(int_tensor(&[2], [1, 1]), encoder_outputs, first.state);

        assert_eq!(second.probs.dims(), [1, 6]);
        assert_eq!(second.state.hidden.dims(), [1, 8]);
        assert_eq!(second.state.cell.dims(), [1, 8]);
    }

    #[test]
    fn test_training_and_step_share_parameters() {
        // Same weights drive both call shapes: stepping with the
        // decoder input tokens must reproduce the training-mode
        // distribution for the first position.
        let model = tiny_model();
        let input = int_tensor(&[1, 2, 3, 0], [1, 4]);

        let logits = model.forward_train(input.clone(), int_tensor(&[1], [1, 1]));
        let train_probs = softmax(logits.reshape([1, 6]), 1);

        let (encoder_outputs, state) = model.encode(input);
        let step = model.forward_step(int_tensor(&[1], [1, 1]), encoder_outputs, state);

        let diff: f32 = (train_probs - step.probs)
            .abs()
            .max()
            .into_scalar()
            .elem();
        assert!(diff < 1e-5);
    }
}
