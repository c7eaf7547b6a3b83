//! Integration tests for bridgeup-deploy.
//!
//! These tests drive full deployment runs against a scripted in-memory chain
//! client that records every call it receives, so ordering and arguments can
//! be asserted without a node.
//! Run with: cargo test --test orchestration_test

use std::{collections::HashMap, sync::Mutex};

use alloy_core::primitives::{Address, B256, U256};
use anyhow::Result;
use bridgeup_deploy::{
    ChainClient, ChainError, ChainId, ConstructorArg, DeployError, GasOverrides,
    L2DeploymentConfig, LpTokenConfig, MemoryRecorder, Step, TokenConfig,
    WrapperDeploymentConfig,
    chain::ids,
    client::{Contract, ContractCall, DeployRequest, TxReceipt, WriteCall},
    deploy_all, deploy_l2, deploy_messenger_wrapper,
    registry::{FX_CHILD_GOERLI, XDAI_AMB_L1},
};

const L1_BRIDGE: Address = Address::repeat_byte(0xb1);
const L1_MESSENGER_WRAPPER: Address = Address::repeat_byte(0xb2);
const CANONICAL_TOKEN: Address = Address::repeat_byte(0xc0);
const L2_MESSENGER: Address = Address::repeat_byte(0xd0);

/// A call received by the scripted chain.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Signers,
    Attach(Contract, Address),
    Deploy {
        request: DeployRequest,
        tx_hash: B256,
    },
    Decimals(Address, Option<GasOverrides>),
    Symbol(Address, Option<GasOverrides>),
    Send {
        call: WriteCall,
        tx_hash: B256,
    },
    Wait(B256),
}

#[derive(Default)]
struct ChainState {
    events: Vec<Event>,
    nonce: u64,
    created: HashMap<B256, Address>,
}

/// In-memory chain client with scripted answers and failures.
struct ScriptedChain {
    signers: Vec<Address>,
    symbol: String,
    decimals: u8,
    fail_attach: Option<Contract>,
    fail_deploy: Option<Contract>,
    no_address_for: Option<Contract>,
    state: Mutex<ChainState>,
}

impl ScriptedChain {
    fn new(signer_count: u8) -> Self {
        Self {
            signers: (1..=signer_count).map(Address::repeat_byte).collect(),
            symbol: "DAI".to_string(),
            decimals: 18,
            fail_attach: None,
            fail_deploy: None,
            no_address_for: None,
            state: Mutex::new(ChainState::default()),
        }
    }

    fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    fn events(&self) -> Vec<Event> {
        self.state.lock().unwrap().events.clone()
    }

    fn deployments(&self) -> Vec<DeployRequest> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Deploy { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    fn deployed(&self, contract: Contract) -> DeployRequest {
        self.deployments()
            .into_iter()
            .find(|request| request.contract == contract)
            .unwrap_or_else(|| panic!("{contract} was not deployed"))
    }

    /// Address a contract was created at.
    fn created(&self, contract: Contract) -> Address {
        let state = self.state.lock().unwrap();
        state
            .events
            .iter()
            .find_map(|event| match event {
                Event::Deploy { request, tx_hash } if request.contract == contract => {
                    state.created.get(tx_hash).copied()
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("{contract} was not created"))
    }

    fn calls(&self) -> Vec<WriteCall> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Send { call, .. } => Some(call),
                _ => None,
            })
            .collect()
    }

    fn next_hash(state: &mut ChainState) -> B256 {
        state.nonce += 1;
        B256::left_padding_from(&state.nonce.to_be_bytes())
    }
}

impl ChainClient for ScriptedChain {
    async fn signers(&self) -> Result<Vec<Address>, ChainError> {
        self.state.lock().unwrap().events.push(Event::Signers);
        Ok(self.signers.clone())
    }

    async fn attach(&self, contract: Contract, address: Address) -> Result<(), ChainError> {
        self.state
            .lock()
            .unwrap()
            .events
            .push(Event::Attach(contract, address));
        if self.fail_attach == Some(contract) {
            return Err(ChainError::NoCode(address));
        }
        Ok(())
    }

    async fn deploy(&self, request: DeployRequest) -> Result<B256, ChainError> {
        // Give concurrent runs a chance to interleave.
        tokio::task::yield_now().await;
        if self.fail_deploy == Some(request.contract) {
            return Err(ChainError::Rpc("insufficient funds".to_string()));
        }

        let mut state = self.state.lock().unwrap();
        let tx_hash = Self::next_hash(&mut state);
        if self.no_address_for != Some(request.contract) {
            let address = Address::left_padding_from(&(0x1000 + state.nonce).to_be_bytes());
            state.created.insert(tx_hash, address);
        }
        state.events.push(Event::Deploy { request, tx_hash });
        Ok(tx_hash)
    }

    async fn decimals(&self, token: Address, overrides: Option<GasOverrides>) -> Result<u8, ChainError> {
        self.state
            .lock()
            .unwrap()
            .events
            .push(Event::Decimals(token, overrides));
        Ok(self.decimals)
    }

    async fn symbol(&self, token: Address, overrides: Option<GasOverrides>) -> Result<String, ChainError> {
        self.state
            .lock()
            .unwrap()
            .events
            .push(Event::Symbol(token, overrides));
        Ok(self.symbol.clone())
    }

    async fn send(&self, call: WriteCall) -> Result<B256, ChainError> {
        let mut state = self.state.lock().unwrap();
        let tx_hash = Self::next_hash(&mut state);
        state.events.push(Event::Send { call, tx_hash });
        Ok(tx_hash)
    }

    async fn wait(&self, tx_hash: B256) -> Result<TxReceipt, ChainError> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Wait(tx_hash));
        Ok(TxReceipt {
            tx_hash,
            contract_address: state.created.get(&tx_hash).copied(),
            block_number: state.nonce,
        })
    }
}

fn config(l1_chain_id: ChainId, l2_chain_id: ChainId) -> L2DeploymentConfig {
    L2DeploymentConfig {
        l1_chain_id,
        l2_chain_id,
        l1_bridge: L1_BRIDGE,
        l1_messenger_wrapper: L1_MESSENGER_WRAPPER,
        l2_canonical_token: CANONICAL_TOKEN,
        l2_messenger: L2_MESSENGER,
        bridge_token: TokenConfig {
            name: "DAI Hop Token".to_string(),
            symbol: "hDAI".to_string(),
            decimals: 18,
        },
        lp_token: LpTokenConfig {
            name: "DAI Hop LP Token".to_string(),
            symbol: "HOP-LP-DAI".to_string(),
        },
        explicit_gas_override: None,
    }
}

/// Initialize tracing for tests, ignoring repeated initialization.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_ethereum_target_on_mainnet() -> Result<()> {
    init_tracing();
    let chain = ScriptedChain::new(1);
    let recorder = MemoryRecorder::new();
    let config = config(ids::ETHEREUM_MAINNET, ids::ETHEREUM_GOERLI);

    let result = deploy_l2(&chain, &recorder, &config).await?;

    let deployed: Vec<Contract> = chain.deployments().iter().map(|r| r.contract).collect();
    assert_eq!(
        deployed,
        vec![
            Contract::BridgeToken,
            Contract::MathUtils,
            Contract::SwapUtils,
            Contract::Swap,
            Contract::L2Bridge,
            Contract::AmmWrapper,
        ]
    );

    // One signer plays every role.
    let owner = Address::repeat_byte(1);
    assert!(chain.deployments().iter().all(|r| r.from == owner));
    let bridge = chain.deployed(Contract::L2Bridge);
    assert_eq!(
        bridge.args.to_vec(),
        vec![
            ConstructorArg::Address(L2_MESSENGER),
            ConstructorArg::Address(owner),
            ConstructorArg::Address(result.bridge_token),
            ConstructorArg::Address(L1_BRIDGE),
            ConstructorArg::AmountList(vec![U256::from(1u64)]),
            ConstructorArg::AddressList(vec![owner]),
        ]
    );

    assert_eq!(result.messenger, L2_MESSENGER);
    assert_eq!(result.messenger_proxy, None);

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result, result);
    assert_eq!(records[0].l2_chain_id, ids::ETHEREUM_GOERLI);

    Ok(())
}

#[tokio::test]
async fn test_swap_libraries_are_linked() -> Result<()> {
    let chain = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let result = deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL)).await?;

    let math_utils = chain.created(Contract::MathUtils);
    let swap_utils = chain.created(Contract::SwapUtils);
    assert_eq!(
        chain.deployed(Contract::SwapUtils).libraries,
        vec![(Contract::MathUtils, math_utils)]
    );
    assert_eq!(
        chain.deployed(Contract::Swap).libraries,
        vec![(Contract::SwapUtils, swap_utils)]
    );

    let initialize = chain
        .calls()
        .into_iter()
        .find(|call| call.to == result.swap)
        .expect("swap was not initialized");
    assert_eq!(
        initialize.call,
        ContractCall::InitializeSwap {
            pooled_tokens: [CANONICAL_TOKEN, result.bridge_token],
            decimals: [18, 18],
            lp_token_name: "DAI Hop LP Token".to_string(),
            lp_token_symbol: "HOP-LP-DAI".to_string(),
            a: 200,
            fee: 4_000_000,
            admin_fee: 0,
            withdraw_fee: 0,
        }
    );

    // xDai bridges take the base chain id and a gas limit after the core fields.
    let bridge = chain.deployed(Contract::XdaiBridge);
    assert_eq!(bridge.args.len(), 8);
    assert_eq!(bridge.args[6], ConstructorArg::Amount(ids::ETHEREUM_GOERLI));
    assert_eq!(bridge.args[7], ConstructorArg::Count(1_500_000));
    // Roles are spread over distinct accounts off mainnet.
    assert_eq!(bridge.args[1], ConstructorArg::Address(Address::repeat_byte(5)));
    assert_eq!(
        bridge.args[5],
        ConstructorArg::AddressList(vec![Address::repeat_byte(2)])
    );

    Ok(())
}

#[tokio::test]
async fn test_polygon_proxy_wiring_is_sequential() -> Result<()> {
    init_tracing();
    let chain = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let config = config(ids::ETHEREUM_GOERLI, ids::POLYGON_MUMBAI);

    let result = deploy_l2(&chain, &recorder, &config).await?;

    let proxy = result.messenger_proxy.expect("proxy was not deployed");
    assert_eq!(result.messenger, proxy);
    assert_eq!(chain.deployments()[0].contract, Contract::PolygonMessengerProxy);

    let bridge = chain.deployed(Contract::PolygonBridge);
    assert_eq!(bridge.args[0], ConstructorArg::Address(proxy));
    assert_eq!(bridge.args.len(), 6);

    let wiring: Vec<ContractCall> = chain
        .calls()
        .into_iter()
        .filter(|call| call.to == proxy)
        .map(|call| call.call)
        .collect();
    assert_eq!(
        wiring,
        vec![
            ContractCall::SetL2Bridge {
                bridge: result.bridge
            },
            ContractCall::SetFxRootTunnel {
                root_tunnel: L1_MESSENGER_WRAPPER
            },
            ContractCall::SetFxChild {
                fx_child: FX_CHILD_GOERLI
            },
        ]
    );

    // Every wiring call is confirmed before the next one is sent.
    let events = chain.events();
    let wiring_events: Vec<&Event> = events
        .iter()
        .skip_while(|event| !matches!(event, Event::Send { call, .. } if call.to == proxy))
        .collect();
    assert_eq!(wiring_events.len(), 6);
    for pair in wiring_events.chunks(2) {
        match pair {
            [Event::Send { tx_hash, .. }, Event::Wait(waited)] => assert_eq!(tx_hash, waited),
            other => panic!("unexpected wiring sequence: {other:?}"),
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_polygon_on_unrecognized_base_chain() -> Result<()> {
    let chain = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let config = config(ids::ETHEREUM_KOVAN, ids::POLYGON_MUMBAI);

    let err = deploy_l2(&chain, &recorder, &config).await.unwrap_err();
    assert!(matches!(err, DeployError::UnrecognizedChainId { .. }));
    assert_eq!(err.step(), Step::DeployMessengerProxy);

    // The lookup fails before anything is written to the chain.
    assert!(chain.deployments().is_empty());
    assert!(chain.calls().is_empty());
    assert!(recorder.records().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_native_wrapped_symbol_is_exact_match() -> Result<()> {
    for (symbol, expected) in [("WETH", true), ("weth", false), ("WETH ", false), ("DAI", false)] {
        let chain = ScriptedChain::new(5).with_symbol(symbol);
        let recorder = MemoryRecorder::new();
        deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_KOVAN, ids::ARBITRUM_TESTNET_3)).await?;

        let wrapper = chain.deployed(Contract::AmmWrapper);
        assert_eq!(wrapper.args.len(), 5);
        assert_eq!(wrapper.args[1], ConstructorArg::Address(CANONICAL_TOKEN));
        assert_eq!(wrapper.args[2], ConstructorArg::Flag(expected), "symbol {symbol:?}");
    }

    Ok(())
}

#[tokio::test]
async fn test_rollup_gas_overrides_follow_call_policy() -> Result<()> {
    let chain = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_KOVAN, ids::OPTIMISM_TESTNET_1)).await?;

    // Reads and writes carry the explicit limit on rollups.
    let overrides = Some(GasOverrides::default());
    for event in chain.events() {
        match event {
            Event::Decimals(_, o) | Event::Symbol(_, o) => assert_eq!(o, overrides),
            Event::Send { call, .. } => assert_eq!(call.overrides, overrides, "{:?}", call.call),
            _ => {}
        }
    }
    assert_eq!(chain.calls().len(), 2);

    let bridge = chain.deployed(Contract::OptimismBridge);
    assert_eq!(bridge.args.len(), 7);
    assert_eq!(bridge.args[6], ConstructorArg::Count(1_500_000));

    // Forcing overrides off wins over the chain id, except for symbol().
    let chain = ScriptedChain::new(5);
    let mut config = config(ids::ETHEREUM_KOVAN, ids::OPTIMISM_TESTNET_1);
    config.explicit_gas_override = Some(false);
    deploy_l2(&chain, &recorder, &config).await?;
    assert!(chain.calls().iter().all(|call| call.overrides.is_none()));
    for event in chain.events() {
        match event {
            Event::Decimals(_, o) => assert_eq!(o, None),
            Event::Symbol(_, o) => assert_eq!(o, overrides),
            _ => {}
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_polygon_gas_overrides_follow_call_policy() -> Result<()> {
    let chain = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let result = deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_GOERLI, ids::POLYGON_MUMBAI)).await?;

    let explicit = Some(GasOverrides::default());
    for event in chain.events() {
        match event {
            Event::Decimals(_, o) => assert_eq!(o, None),
            Event::Symbol(_, o) => assert_eq!(o, explicit),
            _ => {}
        }
    }

    let overrides: Vec<(&'static str, Option<GasOverrides>)> = chain
        .calls()
        .into_iter()
        .map(|call| (call.call.signature(), call.overrides))
        .collect();
    assert_eq!(
        overrides,
        vec![
            (
                "initialize(address[],uint8[],string,string,uint256,uint256,uint256,uint256)",
                None
            ),
            ("transferOwnership(address)", None),
            ("setL2Bridge(address)", explicit),
            ("setFxRootTunnel(address)", None),
            ("setFxChild(address)", None),
        ]
    );
    assert!(result.messenger_proxy.is_some());

    Ok(())
}

#[tokio::test]
async fn test_bridge_token_ownership_moves_to_bridge() -> Result<()> {
    let chain = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let result = deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL)).await?;

    let transfer = chain
        .calls()
        .into_iter()
        .find(|call| call.to == result.bridge_token)
        .expect("ownership was not transferred");
    assert_eq!(
        transfer.call,
        ContractCall::TransferOwnership {
            new_owner: result.bridge
        }
    );
    assert_eq!(transfer.from, Address::repeat_byte(1));

    Ok(())
}

#[tokio::test]
async fn test_attach_failure_aborts_before_deploy() -> Result<()> {
    let mut chain = ScriptedChain::new(5);
    chain.fail_attach = Some(Contract::CanonicalToken);
    let recorder = MemoryRecorder::new();

    let err = deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL))
        .await
        .unwrap_err();

    match &err {
        DeployError::AttachmentFailure {
            step,
            contract,
            address,
            ..
        } => {
            assert_eq!(*step, Step::AttachContracts);
            assert_eq!(*contract, Contract::CanonicalToken);
            assert_eq!(*address, CANONICAL_TOKEN);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(chain.deployments().is_empty());
    assert!(chain.calls().is_empty());
    assert!(recorder.records().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failure_reports_step() -> Result<()> {
    let mut chain = ScriptedChain::new(5);
    chain.fail_deploy = Some(Contract::Swap);
    let recorder = MemoryRecorder::new();

    let err = deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL))
        .await
        .unwrap_err();
    assert_eq!(err.step(), Step::DeployAmm);
    assert!(matches!(err, DeployError::ChainCallFailure { .. }));
    assert!(err.to_string().starts_with("deploy-amm"));

    // Nothing after the failing step was attempted.
    let deployed: Vec<Contract> = chain.deployments().iter().map(|r| r.contract).collect();
    assert_eq!(
        deployed,
        vec![Contract::BridgeToken, Contract::MathUtils, Contract::SwapUtils]
    );
    assert!(recorder.records().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_missing_contract_address() -> Result<()> {
    let mut chain = ScriptedChain::new(5);
    chain.no_address_for = Some(Contract::BridgeToken);
    let recorder = MemoryRecorder::new();

    let err = deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL))
        .await
        .unwrap_err();
    assert_eq!(err.step(), Step::DeployBridgeToken);
    assert!(matches!(
        err,
        DeployError::ChainCallFailure {
            source: ChainError::MissingContractAddress(_),
            ..
        }
    ));

    Ok(())
}

#[tokio::test]
async fn test_insufficient_signers() -> Result<()> {
    let chain = ScriptedChain::new(3);
    let recorder = MemoryRecorder::new();

    let err = deploy_l2(&chain, &recorder, &config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DeployError::InsufficientSigners {
            step: Step::ResolveSigners,
            needed: 5,
            available: 3,
        }
    ));
    assert_eq!(chain.events(), vec![Event::Signers]);

    Ok(())
}

#[tokio::test]
async fn test_repeated_runs_deploy_fresh_contracts() -> Result<()> {
    let chain = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let config = config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL);

    let first = deploy_l2(&chain, &recorder, &config).await?;
    let second = deploy_l2(&chain, &recorder, &config).await?;

    assert_ne!(first.bridge, second.bridge);
    assert_ne!(first.bridge_token, second.bridge_token);

    let records = recorder.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].config_hash, records[1].config_hash);
    assert_ne!(records[0].result, records[1].result);

    Ok(())
}

#[tokio::test]
async fn test_deploy_all_runs_independently() -> Result<()> {
    let optimism = ScriptedChain::new(5);
    let polygon = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let optimism_config = config(ids::ETHEREUM_GOERLI, ids::OPTIMISM_TESTNET_1);
    let polygon_config = config(ids::ETHEREUM_GOERLI, ids::POLYGON_MUMBAI);

    let results = deploy_all(
        [(&optimism, &optimism_config), (&polygon, &polygon_config)],
        &recorder,
    )
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(results.len(), 2);
    assert!(results[0].messenger_proxy.is_none());
    assert!(results[1].messenger_proxy.is_some());

    let mut recorded: Vec<ChainId> = recorder.records().iter().map(|r| r.l2_chain_id).collect();
    recorded.sort();
    assert_eq!(recorded, vec![ids::OPTIMISM_TESTNET_1, ids::POLYGON_MUMBAI]);

    Ok(())
}

#[tokio::test]
async fn test_deploy_all_failure_does_not_cancel_other_runs() -> Result<()> {
    let mut failing = ScriptedChain::new(5);
    failing.fail_deploy = Some(Contract::Swap);
    let healthy = ScriptedChain::new(5);
    let recorder = MemoryRecorder::new();
    let failing_config = config(ids::ETHEREUM_GOERLI, ids::XDAI_SOKOL);
    let healthy_config = config(ids::ETHEREUM_GOERLI, ids::POLYGON_MUMBAI);

    let results = deploy_all(
        [(&failing, &failing_config), (&healthy, &healthy_config)],
        &recorder,
    )
    .await;

    assert_eq!(results.len(), 2);
    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.step(), Step::DeployAmm);

    // The healthy run finished and was recorded even though its sibling failed first.
    let result = results[1].as_ref().expect("healthy run was cancelled");
    assert!(healthy.deployments().len() > failing.deployments().len());
    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].l2_chain_id, ids::POLYGON_MUMBAI);
    assert_eq!(&records[0].result, result);

    Ok(())
}

#[tokio::test]
async fn test_messenger_wrapper_deployment() -> Result<()> {
    let chain = ScriptedChain::new(1);
    let config = WrapperDeploymentConfig {
        l2_chain_id: ids::XDAI_SOKOL,
        l1_bridge: L1_BRIDGE,
        l2_bridge: Address::repeat_byte(0xe2),
        l1_messenger: Address::repeat_byte(0xe3),
    };

    let address = deploy_messenger_wrapper(&chain, &config).await?;
    assert_ne!(address, Address::ZERO);

    let wrapper = chain.deployed(Contract::XdaiMessengerWrapper);
    assert_eq!(
        wrapper.args.to_vec(),
        vec![
            ConstructorArg::Address(L1_BRIDGE),
            ConstructorArg::Address(Address::repeat_byte(0xe2)),
            ConstructorArg::Address(Address::repeat_byte(0xe3)),
            ConstructorArg::Count(1_000_000),
            ConstructorArg::Text("77".to_string()),
            ConstructorArg::Address(XDAI_AMB_L1),
        ]
    );
    assert!(chain.calls().is_empty());

    let unsupported = WrapperDeploymentConfig {
        l2_chain_id: ids::ETHEREUM_KOVAN,
        ..config
    };
    let err = deploy_messenger_wrapper(&chain, &unsupported)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DeployError::UnsupportedFamily {
            step: Step::DeployMessengerWrapper,
            ..
        }
    ));

    Ok(())
}
