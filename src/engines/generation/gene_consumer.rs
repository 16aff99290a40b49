use crate::types::Symbol;

/// Reads a gene's symbols front to back
pub struct GeneConsumer<'a> {
    gene: &'a [Symbol],
    position: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(gene: &'a [Symbol]) -> Self {
        Self { gene, position: 0 }
    }

    /// Next symbol, or `None` once the gene is exhausted
    pub fn consume(&mut self) -> Option<Symbol> {
        let symbol = self.gene.get(self.position).copied()?;
        self.position += 1;
        Some(symbol)
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumes_in_order_without_wrapping() {
        let gene = [Symbol::Function(0), Symbol::Terminal(1)];
        let mut consumer = GeneConsumer::new(&gene);

        assert_eq!(consumer.consume(), Some(Symbol::Function(0)));
        assert_eq!(consumer.consume(), Some(Symbol::Terminal(1)));
        assert_eq!(consumer.position(), 2);
        assert_eq!(consumer.consume(), None);
    }
}
