#[cfg(test)]
mod integration_tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use dagsim_core::{Block, BlockHeader, BlockId, Params};

    use crate::pipeline::BlockProcessor;

    fn block(id: u64, parents: &[u64], time: f64) -> Block {
        let parents = parents.iter().map(|&p| BlockId(p)).collect();
        Block::new(
            BlockHeader::new(BlockId(id), 1, time, parents),
            Default::default(),
        )
    }

    fn ids(raw: &[u64]) -> Vec<BlockId> {
        raw.iter().map(|&id| BlockId(id)).collect()
    }

    /// A snapshot of everything consensus decides about a DAG.
    fn consensus_state(processor: &BlockProcessor) -> (Vec<BlockId>, Vec<(BlockId, bool, u64)>, Vec<BlockId>) {
        let ordering = processor.compute_ordering();
        let colouring = processor
            .relations()
            .all_ids()
            .into_iter()
            .map(|id| {
                let data = processor.ghostdag_data(&id).unwrap();
                (id, data.blue, data.blue_score)
            })
            .collect();
        (ordering, colouring, processor.tips())
    }

    /// Parents of the DAG used by the delivery-order tests, keyed by
    /// block id; times follow the ids.
    fn test_dag() -> Vec<(u64, Vec<u64>)> {
        vec![
            (1, vec![0]),
            (2, vec![0]),
            (3, vec![1, 2]),
            (4, vec![1]),
            (5, vec![2, 3]),
            (6, vec![3, 4]),
            (7, vec![5, 6]),
            (8, vec![7]),
            (9, vec![5]),
            (10, vec![8, 9]),
        ]
    }

    fn feed(processor: &BlockProcessor, order: &[(u64, Vec<u64>)]) {
        for (id, parents) in order {
            processor
                .add_block(block(*id, parents, *id as f64))
                .unwrap();
        }
    }

    #[test]
    fn test_out_of_order_arrival_matches_in_order() {
        // in order
        let in_order = BlockProcessor::new(Params::new(3));
        in_order.add_block(block(1, &[0], 1.0)).unwrap();
        in_order.add_block(block(2, &[0], 2.0)).unwrap();
        in_order.add_block(block(3, &[1, 2], 3.0)).unwrap();

        // the merge block first
        let reordered = BlockProcessor::new(Params::new(3));
        let result = reordered.add_block(block(3, &[1, 2], 3.0)).unwrap();
        assert!(result.is_orphan());
        reordered.add_block(block(1, &[0], 1.0)).unwrap();
        let result = reordered.add_block(block(2, &[0], 2.0)).unwrap();
        assert_eq!(result.unorphaned, ids(&[3]));

        assert_eq!(consensus_state(&in_order), consensus_state(&reordered));
        assert_eq!(reordered.tips(), ids(&[3]));
        assert_eq!(reordered.orphan_count(), 0);
    }

    #[test]
    fn test_reversed_chain_cascade() {
        let processor = BlockProcessor::new(Params::new(3));

        for id in (2..=6u64).rev() {
            let result = processor.add_block(block(id, &[id - 1], id as f64)).unwrap();
            assert!(result.is_orphan());
        }
        assert_eq!(processor.orphan_count(), 5);

        // the missing link releases the whole chain in one replay
        let result = processor.add_block(block(1, &[0], 1.0)).unwrap();
        assert!(result.is_accepted());
        assert_eq!(result.unorphaned, ids(&[2, 3, 4, 5, 6]));
        assert_eq!(processor.orphan_count(), 0);
        assert_eq!(processor.blue_score(&BlockId(6)), Some(7));
        assert_eq!(processor.compute_ordering(), ids(&[0, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_delivery_order_independence() {
        let reference = BlockProcessor::new(Params::new(3));
        feed(&reference, &test_dag());
        let expected = consensus_state(&reference);
        assert_eq!(reference.block_count(), 11);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..8 {
            let mut order = test_dag();
            order.shuffle(&mut rng);

            let shuffled = BlockProcessor::new(Params::new(3));
            feed(&shuffled, &order);

            assert_eq!(shuffled.orphan_count(), 0);
            assert_eq!(consensus_state(&shuffled), expected);
        }
    }

    #[test]
    fn test_duplicate_delivery_is_idempotent() {
        let reference = BlockProcessor::new(Params::new(3));
        feed(&reference, &test_dag());
        let expected = consensus_state(&reference);

        let noisy = BlockProcessor::new(Params::new(3));
        for (id, parents) in test_dag() {
            noisy.add_block(block(id, &parents, id as f64)).unwrap();
            // a retransmission of every block, straight after the first copy
            let result = noisy.add_block(block(id, &parents, id as f64)).unwrap();
            assert!(result.is_duplicate());
        }

        assert_eq!(consensus_state(&noisy), expected);
    }

    #[test]
    fn test_ordering_is_topological_and_stable() {
        let processor = BlockProcessor::new(Params::new(3));
        feed(&processor, &test_dag());

        let ordering = processor.compute_ordering();
        assert_eq!(ordering.len(), processor.block_count());

        let position: HashMap<BlockId, usize> = ordering
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();
        let relations = processor.relations();
        for id in relations.all_ids() {
            for parent in relations.parents_of(&id) {
                assert!(position[&parent] < position[&id], "parent {parent} after child {id}");
            }
        }

        assert_eq!(processor.compute_ordering(), ordering);
    }

    #[test]
    fn test_colouring_invariants_across_dag() {
        let processor = BlockProcessor::new(Params::new(3));
        feed(&processor, &test_dag());

        let protocol = processor.protocol();
        for id in processor.relations().all_ids() {
            let data = processor.ghostdag_data(&id).unwrap();

            // the recorded score matches its definition
            let blue_set = protocol.blue_set(id).unwrap();
            let past = processor.past(id);
            let expected = past.intersection(&blue_set).count() as u64
                + u64::from(blue_set.contains(&id));
            assert_eq!(data.blue_score, expected, "id={id}");

            // scores never decrease along selected-parent edges, and
            // every accepted blue set is a k-cluster
            if let Some(parent) = data.selected_parent {
                assert!(data.blue_score >= processor.blue_score(&parent).unwrap());
            }
            assert!(processor.is_k_cluster(&blue_set), "id={id}");
        }
    }

    #[test]
    fn test_orphan_with_pooled_parent_waits() {
        let processor = BlockProcessor::new(Params::new(3));

        // 2's parent 1 is pooled itself; neither may be accepted yet
        processor.add_block(block(2, &[1], 2.0)).unwrap();
        let result = processor.add_block(block(1, &[5], 1.0)).unwrap();
        assert!(result.is_orphan());
        assert_eq!(processor.orphan_count(), 2);
        assert_eq!(processor.block_count(), 1);

        // 5 arrives and the chain 5 <- 1 <- 2 drains in one call
        let result = processor.add_block(block(5, &[0], 0.5)).unwrap();
        assert!(result.is_accepted());
        assert_eq!(result.unorphaned, ids(&[1, 2]));
        assert_eq!(processor.block_count(), 4);
        assert_eq!(processor.orphan_count(), 0);
    }
}
