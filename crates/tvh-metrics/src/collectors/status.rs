use async_trait::async_trait;
use tvh_client::{Collection, DataSource};
use tvh_common::error::Result;

use crate::{
    catalog::{MetricCatalog, MetricId},
    collectors::{Collector, record_count},
    labels::LabelField,
    snapshot::Snapshot,
};

pub struct SubscriptionMetrics {
    count: MetricId,
    start_time: MetricId,
    input_rate: MetricId,
    output_rate: MetricId,
    received_bytes: MetricId,
    sent_bytes: MetricId,
    errors: MetricId,
}

impl SubscriptionMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        let per_stream = &["id", "channel"];
        Ok(Self {
            count: catalog.gauge("subscription_count", "Number of active subscriptions", &[])?,
            start_time: catalog.gauge(
                "active_subscription_start_time",
                "Start time for an active connection/stream to the server",
                &[
                    "id", "hostname", "username", "client", "title", "channel", "service",
                    "state",
                ],
            )?,
            input_rate: catalog.gauge(
                "subscription_input_bytes_per_second",
                "Current input rate of a subscription",
                per_stream,
            )?,
            output_rate: catalog.gauge(
                "subscription_output_bytes_per_second",
                "Current output rate of a subscription",
                per_stream,
            )?,
            received_bytes: catalog.counter(
                "subscription_received_bytes",
                "Bytes received by a subscription since it started",
                per_stream,
            )?,
            sent_bytes: catalog.counter(
                "subscription_sent_bytes",
                "Bytes sent by a subscription since it started",
                per_stream,
            )?,
            errors: catalog.counter(
                "subscription_errors",
                "Errors seen by a subscription since it started",
                per_stream,
            )?,
        })
    }
}

#[async_trait]
impl Collector for SubscriptionMetrics {
    fn section(&self) -> &'static str {
        "subscriptions"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let subscriptions = source.fetch(Collection::Subscriptions).await?;
        record_count(snapshot, self.count, subscriptions.len())?;

        let descriptive = [
            LabelField::Optional("id"),
            LabelField::Optional("hostname"),
            LabelField::Optional("username"),
            LabelField::Optional("client"),
            LabelField::Optional("title"),
            LabelField::Optional("channel"),
            LabelField::Optional("service"),
            LabelField::Optional("state"),
        ];
        // Rates and totals are per subscription, so they need its id to stay distinct.
        let per_stream = [LabelField::Required("id"), LabelField::Optional("channel")];

        for subscription in &subscriptions {
            snapshot.add_from_record(
                self.start_time,
                subscription,
                &descriptive,
                subscription.number("start"),
            )?;
            snapshot.add_from_record(
                self.input_rate,
                subscription,
                &per_stream,
                subscription.number("in"),
            )?;
            snapshot.add_from_record(
                self.output_rate,
                subscription,
                &per_stream,
                subscription.number("out"),
            )?;
            snapshot.add_from_record(
                self.received_bytes,
                subscription,
                &per_stream,
                subscription.number("total_in"),
            )?;
            snapshot.add_from_record(
                self.sent_bytes,
                subscription,
                &per_stream,
                subscription.number("total_out"),
            )?;
            snapshot.add_from_record(
                self.errors,
                subscription,
                &per_stream,
                subscription.number("errors"),
            )?;
        }
        Ok(())
    }
}

pub struct ConnectionMetrics {
    count: MetricId,
    start_time: MetricId,
}

impl ConnectionMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        Ok(Self {
            count: catalog.gauge(
                "connection_count",
                "Number of open client connections",
                &[],
            )?,
            start_time: catalog.gauge(
                "connection_start_time",
                "Start time of an open client connection",
                &["id", "type", "peer", "user"],
            )?,
        })
    }
}

#[async_trait]
impl Collector for ConnectionMetrics {
    fn section(&self) -> &'static str {
        "connections"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let connections = source.fetch(Collection::Connections).await?;
        record_count(snapshot, self.count, connections.len())?;

        let labels = [
            LabelField::Optional("id"),
            LabelField::Optional("type"),
            LabelField::Optional("peer"),
            LabelField::Optional("user"),
        ];
        for connection in &connections {
            snapshot.add_from_record(
                self.start_time,
                connection,
                &labels,
                connection.number("started"),
            )?;
        }
        Ok(())
    }
}

pub struct InputMetrics {
    count: MetricId,
    subscriptions: MetricId,
    weight: MetricId,
    signal: MetricId,
    snr: MetricId,
    bit_error_rate: MetricId,
    bandwidth: MetricId,
    uncorrected_blocks: MetricId,
    transport_errors: MetricId,
    continuity_errors: MetricId,
}

impl InputMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        let tuner = &["input", "stream"];
        let scaled = &["input", "stream", "scale"];
        Ok(Self {
            count: catalog.gauge("input_count", "Number of active inputs (tuners)", &[])?,
            subscriptions: catalog.gauge(
                "input_subscriptions",
                "Subscriptions served by an input",
                tuner,
            )?,
            weight: catalog.gauge("input_weight", "Current weight of an input", tuner)?,
            signal: catalog.gauge(
                "input_signal",
                "Signal strength of an input, unit given by the scale label",
                scaled,
            )?,
            snr: catalog.gauge(
                "input_snr",
                "Signal to noise ratio of an input, unit given by the scale label",
                scaled,
            )?,
            bit_error_rate: catalog.gauge(
                "input_bit_error_rate",
                "Bit error rate of an input",
                tuner,
            )?,
            bandwidth: catalog.gauge(
                "input_bandwidth_bits_per_second",
                "Current bandwidth of an input",
                tuner,
            )?,
            uncorrected_blocks: catalog.counter(
                "input_uncorrected_blocks",
                "Uncorrected blocks seen by an input",
                tuner,
            )?,
            transport_errors: catalog.counter(
                "input_transport_errors",
                "Transport errors seen by an input",
                tuner,
            )?,
            continuity_errors: catalog.counter(
                "input_continuity_errors",
                "Continuity errors seen by an input",
                tuner,
            )?,
        })
    }
}

#[async_trait]
impl Collector for InputMetrics {
    fn section(&self) -> &'static str {
        "inputs"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let inputs = source.fetch(Collection::Inputs).await?;
        record_count(snapshot, self.count, inputs.len())?;

        let tuner = [LabelField::Optional("input"), LabelField::Optional("stream")];
        let signal_labels = [
            LabelField::Optional("input"),
            LabelField::Optional("stream"),
            LabelField::Optional("signal_scale"),
        ];
        let snr_labels = [
            LabelField::Optional("input"),
            LabelField::Optional("stream"),
            LabelField::Optional("snr_scale"),
        ];

        let simple = [
            (self.subscriptions, "subs"),
            (self.weight, "weight"),
            (self.bit_error_rate, "ber"),
            (self.bandwidth, "bps"),
            (self.uncorrected_blocks, "unc"),
            (self.transport_errors, "te"),
            (self.continuity_errors, "cc"),
        ];

        for input in &inputs {
            for (id, key) in simple {
                snapshot.add_from_record(id, input, &tuner, input.number(key))?;
            }
            snapshot.add_from_record(self.signal, input, &signal_labels, input.number("signal"))?;
            snapshot.add_from_record(self.snr, input, &snr_labels, input.number("snr"))?;
        }
        Ok(())
    }
}
