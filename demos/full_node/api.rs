//! Demo node API.

use crate::types::*;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::mpsc::Receiver;

/// Result of an API call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Methods shared by every node type.
pub trait Common: Send + Sync {
    /// Version provides information about API provider
    fn version(&self, ctx: Context) -> ApiResult<Version>;

    /// NetPeers lists the peers the node is connected to.
    fn net_peers(&self, ctx: Context) -> ApiResult<Vec<AddrInfo>>;

    /// NetConnectedness returns the connection state of a peer.
    fn net_connectedness(&self, ctx: Context, peer: PeerId) -> ApiResult<Connectedness>;

    /// ID returns the peer ID of the node.
    fn id(&self, ctx: Context) -> ApiResult<PeerId>;
}

/// FullNode API is a low-level interface to the Filecoin network full node
pub trait FullNode: Common {
    // MethodGroup: Chain
    // The Chain method group contains methods for interacting with the
    // blockchain, but that do not require any form of state computation.

    /// ChainNotify returns channel with chain head updates.
    /// First message is guaranteed to be of len == 1, and type == 'current'.
    fn chain_notify(&self, ctx: Context) -> ApiResult<Receiver<Vec<HeadChange>>>;

    /// ChainHead returns the current head of the chain.
    fn chain_head(&self, ctx: Context) -> ApiResult<TipSet>;

    /// ChainGetBlock returns the block specified by the given CID.
    fn chain_get_block(&self, ctx: Context, cid: Cid) -> ApiResult<Box<BlockHeader>>;

    /// ChainGetTipSetByHeight looks back for a tipset at the specified epoch.
    /// If there are no blocks at the specified epoch, a tipset at an earlier epoch
    /// will be returned.
    fn chain_get_tip_set_by_height(
        &self,
        ctx: Context,
        height: ChainEpoch,
        tsk: TipSetKey,
    ) -> ApiResult<TipSet>;

    /// ChainReadObj reads ipld nodes referenced by the specified CID from chain
    /// blockstore and returns raw bytes.
    fn chain_read_obj(&self, ctx: Context, obj: Cid) -> ApiResult<Vec<u8>>;

    /// ChainGetRandomness is used to sample the chain for randomness.
    fn chain_get_randomness(
        &self,
        ctx: Context,
        tsk: TipSetKey,
        personalization: DomainSeparationTag,
        rand_epoch: ChainEpoch,
        entropy: Vec<u8>,
    ) -> ApiResult<Vec<u8>>;

    // MethodGroup: Mpool

    /// MpoolPending returns pending mempool messages.
    fn mpool_pending(&self, ctx: Context, tsk: TipSetKey) -> ApiResult<Vec<Box<SignedMessage>>>;

    /// MpoolPush pushes a signed message to mempool.
    fn mpool_push(&self, ctx: Context, msg: Box<SignedMessage>) -> ApiResult<Cid>;

    /// MpoolSub subscribes to mempool changes.
    fn mpool_sub(&self, ctx: Context) -> ApiResult<Receiver<MpoolUpdate>>;

    /// MethodGroup: Wallet

    /// WalletNew creates a new address in the wallet with the given sigType.
    fn wallet_new(&self, ctx: Context, sig_type: SigType) -> ApiResult<Address>;

    /// WalletBalance returns the balance of the given address at the current head of the chain.
    fn wallet_balance(&self, ctx: Context, addr: Address) -> ApiResult<BigInt>;

    /// WalletSign signs the given bytes using the given address.
    fn wallet_sign(&self, ctx: Context, addr: Address, msg: Vec<u8>) -> ApiResult<Box<Signature>>;

    fn wallet_list(&self, ctx: Context) -> ApiResult<Vec<Address>>;

    // MethodGroup: State

    /// StateGetActor returns the indicated actor's nonce and balance.
    fn state_get_actor(
        &self,
        ctx: Context,
        actor: Address,
        tsk: TipSetKey,
    ) -> ApiResult<Option<Actor>>;

    /// StateListActors returns the addresses of every actor in the state
    fn state_list_actors(&self, ctx: Context, tsk: TipSetKey) -> ApiResult<Vec<Address>>;

    /// StateMarketParticipants returns the Escrow and Locked balances of every participant in the Storage Market
    fn state_market_participants(
        &self,
        ctx: Context,
        tsk: TipSetKey,
    ) -> ApiResult<HashMap<String, MarketBalance>>;

    /// StateMarketDeals returns information about every deal in the Storage Market
    fn state_market_deals(
        &self,
        ctx: Context,
        tsk: TipSetKey,
    ) -> ApiResult<HashMap<String, MarketDeal>>;

    /// StateGetReceipt returns the message receipt for the given message
    fn state_get_receipt(
        &self,
        ctx: Context,
        msg: Cid,
        tsk: TipSetKey,
    ) -> ApiResult<Option<MessageReceipt>>;

    /// StateChangedActors returns all the actors whose states change between the two given state CIDs
    fn state_changed_actors(
        &self,
        ctx: Context,
        old: Cid,
        new: Cid,
    ) -> ApiResult<HashMap<String, Actor>>;

    /// StateSectorSize returns the sector size of the given miner.
    fn state_sector_size(
        &self,
        ctx: Context,
        miner: Address,
        tsk: TipSetKey,
    ) -> ApiResult<SectorSize>;

    // MethodGroup: Sync

    /// SyncState returns the current status of the lotus sync system.
    fn sync_state(&self, ctx: Context) -> ApiResult<SyncState>;

    /// SyncMarkBad marks a blocks as bad, meaning that it won't ever by synced.
    /// Use with extreme caution.
    fn sync_mark_bad(&self, ctx: Context, bcid: Cid) -> ApiResult<()>;

    /// StateNetworkName returns the name of the network the node is synced to
    fn state_network_name(&self, ctx: Context) -> ApiResult<NetworkName>;

    /// Shutdown stops the node.
    fn shutdown(&self, ctx: Context) -> ApiResult<()>;

    /// Session returns a random UUID of the api provider session
    fn session(&self, ctx: Context) -> ApiResult<Permission>;

    /// AuthVerify checks a token and returns the permissions it carries.
    fn auth_verify(&self, ctx: Context, token: String) -> ApiResult<Vec<Permission>>;

    /// LogList lists the logging subsystems.
    fn log_list(&self, ctx: Context) -> ApiResult<Vec<String>>;

    /// PaychGet gets or creates a payment channel between address pair.
    fn paych_get(
        &self,
        ctx: Context,
        from: Address,
        to: Address,
        amt: BigInt,
    ) -> ApiResult<Option<PaychInfo>>;

    /// ClientHasLocal indicates whether a certain CID is locally stored.
    fn client_has_local(&self, ctx: Context, root: Cid) -> ApiResult<bool>;

    /// StateWaitMsg looks back in the chain for a message, waiting up to the given duration.
    fn state_wait_msg_limited(
        &self,
        ctx: Context,
        msg: Cid,
        confidence: u64,
        timeout: Duration,
    ) -> ApiResult<Option<MessageReceipt>>;

    /// SyncIncomingBlocks returns a channel streaming incoming, potentially not
    /// yet synced block headers.
    fn sync_incoming_blocks(&self, ctx: Context) -> ApiResult<Receiver<Box<BlockHeader>>>;

    /// NetAddrsListen returns the listen addresses of the node.
    fn net_addrs_listen(&self, ctx: Context) -> ApiResult<AddrInfo>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaychInfo {
    pub channel: Address,
    pub waiting_for: Cid,
    pub direction: PchDir,
}
