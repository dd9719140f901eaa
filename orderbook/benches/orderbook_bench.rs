use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orderbook::{FeedHandler, OrderBook, OrderId, Side};

fn bench_order_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_insertion");

    for &num_orders in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("resting_orders", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter(|| {
                    let mut book = OrderBook::new("AAPL");
                    for i in 0..num_orders {
                        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
                        let price = if i % 2 == 0 { 100.0 - (i as f64) } else { 101.0 + (i as f64) };
                        book.add(OrderId(i as u64), side, 100, price).unwrap();
                        black_box(());
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_market_data_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_data");

    let mut book = OrderBook::new("AAPL");
    for i in 0..1000u64 {
        book.add(OrderId(i), Side::Sell, 100, 100.0 + i as f64).unwrap();
        book.add(OrderId(i + 1000), Side::Buy, 100, 99.0 - i as f64).unwrap();
    }

    group.bench_function("bbo", |b| b.iter(|| black_box(book.bbo())));
    group.bench_function("price_levels", |b| b.iter(|| black_box(book.price_levels())));
    group.bench_function("full_depth", |b| b.iter(|| black_box(book.full_depth())));
    group.bench_function("vwap_500", |b| b.iter(|| black_box(book.vwap(500))));

    group.finish();
}

fn bench_modify_and_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("modify_cancel");

    for &num_orders in [100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("modify_same_side", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter_batched(
                    || {
                        let mut book = OrderBook::new("AAPL");
                        for i in 0..num_orders {
                            book.add(OrderId(i as u64), Side::Buy, 100, 100.0).unwrap();
                        }
                        book
                    },
                    |mut book| {
                        for i in 0..num_orders {
                            book.modify(OrderId(i as u64), 50, 100.0 - i as f64).unwrap();
                            black_box(());
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(
            BenchmarkId::new("cancel_every_order", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter_batched(
                    || {
                        let mut book = OrderBook::new("AAPL");
                        for i in 0..num_orders {
                            book.add(OrderId(i as u64), Side::Buy, 100, 100.0).unwrap();
                        }
                        book
                    },
                    |mut book| {
                        for i in 0..num_orders {
                            book.cancel(OrderId(i as u64)).unwrap();
                            black_box(());
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_feed_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed_replay");

    group.bench_function("rapid_order_flow", |b| {
        b.iter(|| {
            let mut handler = FeedHandler::new(None, |_: &str| {}, |_: &str, _: &str| {});
            let mut order_id = 1u64;

            for _ in 0..100 {
                for i in 0..5 {
                    handler.process_command(&format!(
                        "ORDER ADD,{order_id},AAPL,Sell,100,{}",
                        100.0 + i as f64
                    ));
                    order_id += 1;
                    handler.process_command(&format!(
                        "ORDER ADD,{order_id},AAPL,Buy,100,{}",
                        99.0 - i as f64
                    ));
                    order_id += 1;
                }
                handler.process_command(&format!("ORDER ADD,{order_id},AAPL,Buy,300,102.0"));
                order_id += 1;
                handler.process_command("PRINT,AAPL");
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_order_insertion,
    bench_market_data_access,
    bench_modify_and_cancel,
    bench_feed_replay,
);

criterion_main!(benches);
