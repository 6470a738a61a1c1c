use std::sync::Arc;

use actix::{Actor, AsyncContext, Context};
use visor_chain::Chain;
use visor_network::ConnectionPool;
use visor_pool::UnconfirmedPool;
use visor_primitives::{Config, Transaction};

use crate::clock::Clock;
use crate::error::VisorError;
use crate::messages::{AnnounceBlocks, RefreshUnconfirmed, RequestBlocks};

/// The Visor actor: the single strand that owns the chain,
/// the unconfirmed pool, and the peer-height map. An `actix::Actor`'s
/// mailbox is a bounded request queue with in-order, single-threaded
/// handling built in, which gives linearizable request processing for free
/// instead of requiring a hand-rolled channel loop.
pub struct VisorActor {
    pub(crate) config: Config,
    pub(crate) chain: Box<dyn Chain>,
    pub(crate) pool: Box<dyn UnconfirmedPool>,
    pub(crate) heights: visor_network::PeerHeightMap,
    pub(crate) conn: Arc<dyn ConnectionPool>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl VisorActor {
    pub fn new(
        config: Config,
        chain: Box<dyn Chain>,
        pool: Box<dyn UnconfirmedPool>,
        conn: Arc<dyn ConnectionPool>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        VisorActor { config, chain, pool, heights: visor_network::PeerHeightMap::new(), conn, clock }
    }

    /// Raw pool insert-or-detect-duplicate, shared by `InjectTxn`, the
    /// `InjectTransaction` pipeline's last step, and the `GiveTxns` handler,
    /// which all need an insertion that skips redundant verification.
    pub(crate) fn raw_inject_txn(&mut self, tx: Transaction) -> Result<bool, VisorError> {
        let now = self.clock.now_unix();
        self.pool.inject_txn(tx, now).map_err(VisorError::from)
    }
}

impl Actor for VisorActor {
    type Context = Context<Self>;

    /// Schedules the node's periodic sync triggers via `run_interval`.
    /// See DESIGN.md for why the actor self-schedules these instead of
    /// relying on an external driver. The blockchain backup cadence stays
    /// external: it names a storage snapshot, not a Visor operation.
    fn started(&mut self, ctx: &mut Self::Context) {
        let request_rate = self.config.blocks_request_rate();
        ctx.run_interval(request_rate, |_act, ctx| {
            ctx.address().do_send(RequestBlocks);
        });

        let announce_rate = self.config.blocks_announce_rate();
        ctx.run_interval(announce_rate, |_act, ctx| {
            ctx.address().do_send(AnnounceBlocks);
        });

        let refresh_rate = self.config.unconfirmed_refresh_rate();
        ctx.run_interval(refresh_rate, |_act, ctx| {
            ctx.address().do_send(RefreshUnconfirmed);
        });
    }
}
