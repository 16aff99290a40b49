use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hall_of_fame_size: usize);
    fn on_individual_evaluated(&mut self, individual_num: usize, total: usize);
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        println!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hof_size: usize) {
        println!(
            "Generation {} complete. Best fitness: {:.4}, Hall of Fame size: {}",
            generation + 1,
            best_fitness,
            hof_size
        );
    }

    fn on_individual_evaluated(&mut self, individual_num: usize, total: usize) {
        if individual_num % 100 == 0 || individual_num == total {
            println!("  Evaluated {}/{} individuals", individual_num, total);
        }
    }
}

/// Discards all progress
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _hof_size: usize) {}
    fn on_individual_evaluated(&mut self, _individual_num: usize, _total: usize) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { generation: usize, best_fitness: f64, hof_size: usize },
    IndividualEvaluated { current: usize, total: usize },
}

/// Forwards progress over a channel, e.g. to a thread watching the run.
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

// A dropped receiver just stops the reporting.
impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hof_size: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            hof_size,
        });
    }

    fn on_individual_evaluated(&mut self, individual_num: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::IndividualEvaluated {
            current: individual_num,
            total,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_channel_forwards_messages() {
        let (tx, rx) = mpsc::channel();
        let mut callback = ChannelProgressCallback::new(tx);
        callback.on_generation_start(0);
        callback.on_generation_complete(0, 12.5, 3);

        let messages: Vec<ProgressMessage> = rx.try_iter().collect();
        assert_eq!(
            messages,
            vec![
                ProgressMessage::GenerationStart(0),
                ProgressMessage::GenerationComplete { generation: 0, best_fitness: 12.5, hof_size: 3 },
            ]
        );
    }

    #[test]
    fn test_channel_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut callback = ChannelProgressCallback::new(tx);
        callback.on_individual_evaluated(1, 1);
    }
}
